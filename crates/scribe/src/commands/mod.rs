//! CLI command implementations.

pub(crate) mod git;
pub(crate) mod render;
pub(crate) mod theme;
pub(crate) mod tree;

use std::path::Path;

use scribe_state::{ProjectCapabilities, ToastQueue};

use crate::output::Output;

pub(crate) use git::{CommitArgs, PushArgs};
pub(crate) use render::RenderArgs;
pub(crate) use theme::ThemeArgs;
pub(crate) use tree::TreeArgs;

/// Print every queued toast in display order and remove it from the queue.
pub(crate) fn flush_toasts(output: &Output, queue: &mut ToastQueue) {
    let ids: Vec<_> = queue.toasts().map(|toast| toast.id).collect();
    for id in ids {
        if let Some(toast) = queue.remove(id) {
            output.toast(&toast);
        }
    }
}

/// Capability flags of a project directory.
///
/// Only git is detected; the themed doc site flag stays unset.
pub(crate) fn probe_capabilities(dir: &Path) -> ProjectCapabilities {
    ProjectCapabilities {
        is_git_repo: dir.join(".git").exists(),
        is_themed_doc_site: false,
    }
}
