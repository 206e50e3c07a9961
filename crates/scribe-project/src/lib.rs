//! Host-side services for an open project directory.
//!
//! - [`scan_tree`] lists the project files as a [`FileNode`] tree
//! - [`GitRepo`] stages, commits and pushes through the `git` executable

mod git;
mod tree;

pub use git::{GitError, GitRepo};
pub use tree::{DEFAULT_IGNORED, FileNode, scan_tree};
