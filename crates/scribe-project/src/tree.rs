//! Recursive project file listing.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::Serialize;

/// Entry names skipped when no ignore list is configured.
pub const DEFAULT_IGNORED: &[&str] = &[".git", "node_modules", ".temp", ".cache"];

/// A file or directory in the project tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNode {
    pub name: String,
    /// Full path (the scanned root joined with the entry's relative path).
    pub path: String,
    pub is_dir: bool,
    /// Directory contents; `None` for files.
    pub children: Option<Vec<FileNode>>,
}

/// List `root` recursively.
///
/// Entries whose file name equals one of `ignored` are skipped together with
/// their contents. Each level lists directories first, then files, both
/// ordered by case-insensitive name. A directory that cannot be read yields
/// no entries.
pub fn scan_tree<S: AsRef<str>>(root: &Path, ignored: &[S]) -> Vec<FileNode> {
    let Ok(entries) = fs::read_dir(root) else {
        tracing::debug!(path = %root.display(), "Skipping unreadable directory");
        return Vec::new();
    };

    let mut nodes: Vec<FileNode> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if ignored.iter().any(|skip| skip.as_ref() == name) {
                return None;
            }

            let path = entry.path();
            let is_dir = path.is_dir();
            let children = is_dir.then(|| scan_tree(&path, ignored));
            Some(FileNode {
                name,
                path: path.to_string_lossy().into_owned(),
                is_dir,
                children,
            })
        })
        .collect();

    nodes.sort_by(compare_nodes);
    nodes
}

fn compare_nodes(a: &FileNode, b: &FileNode) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}
