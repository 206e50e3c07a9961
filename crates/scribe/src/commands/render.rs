//! `scribe render` command implementation.

use std::path::PathBuf;

use clap::Args;
use scribe_renderer::create_markdown_renderer;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the markdown file.
    file: PathBuf,

    /// Write the result to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit HTML, table of contents and warnings as JSON.
    #[arg(long)]
    json: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the output cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let markdown = std::fs::read_to_string(&self.file)?;
        let renderer = create_markdown_renderer();
        let result = renderer.render(&markdown);

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let body = if self.json {
            serde_json::to_string_pretty(&result)?
        } else {
            result.html
        };

        match self.output {
            Some(path) => {
                std::fs::write(&path, body)?;
                output.success(&format!(
                    "Rendered {} -> {}",
                    self.file.display(),
                    path.display()
                ));
            }
            None => output.print(body.trim_end())?,
        }

        Ok(())
    }
}
