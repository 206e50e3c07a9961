//! `scribe tree` command implementation.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Args;
use scribe_config::Config;
use scribe_project::{FileNode, scan_tree};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Project directory to list.
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Print the tree as JSON.
    #[arg(long)]
    json: bool,

    /// Path to configuration file (default: auto-discover scribe.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or the directory does not exist.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;

        if !self.dir.is_dir() {
            return Err(CliError::Validation(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }

        let nodes = scan_tree(&self.dir, &config.project.ignore);
        tracing::info!(dir = %self.dir.display(), entries = nodes.len(), "Scanned project");

        let text = if self.json {
            serde_json::to_string_pretty(&nodes)?
        } else {
            format_tree(&nodes)
        };
        output.print(text.trim_end())?;
        Ok(())
    }
}

/// Indented listing with a trailing `/` on directories.
fn format_tree(nodes: &[FileNode]) -> String {
    fn walk(nodes: &[FileNode], depth: usize, out: &mut String) {
        for node in nodes {
            let suffix = if node.is_dir { "/" } else { "" };
            let _ = writeln!(out, "{}{}{suffix}", "  ".repeat(depth), node.name);
            if let Some(children) = &node.children {
                walk(children, depth + 1, out);
            }
        }
    }

    let mut out = String::new();
    walk(nodes, 0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn file(name: &str) -> FileNode {
        FileNode {
            name: name.to_owned(),
            path: format!("/p/{name}"),
            is_dir: false,
            children: None,
        }
    }

    #[test]
    fn test_format_tree() {
        let nodes = vec![
            FileNode {
                name: "docs".to_owned(),
                path: "/p/docs".to_owned(),
                is_dir: true,
                children: Some(vec![file("index.md")]),
            },
            file("README.md"),
        ];

        assert_eq!(format_tree(&nodes), "docs/\n  index.md\nREADME.md\n");
    }
}
