//! The currently open project.

use crate::event::{StateReceiver, Subscribers};

/// Capability flags of a project directory.
///
/// Determined by whoever opens the project (e.g., by probing for `.git`);
/// the context only stores them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectCapabilities {
    pub is_git_repo: bool,
    pub is_themed_doc_site: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectEvent {
    PathChanged(String),
}

/// Path of the open project and its capability flags.
#[derive(Default)]
pub struct ProjectContext {
    path: String,
    capabilities: ProjectCapabilities,
    subscribers: Subscribers<ProjectEvent>,
}

impl ProjectContext {
    /// No project open: empty path, all flags false.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: ProjectCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Replace the project path. The path is stored as given; flags are unchanged.
    pub fn set_project(&mut self, path: impl Into<String>) {
        self.path = path.into();
        self.subscribers
            .notify(&ProjectEvent::PathChanged(self.path.clone()));
    }

    #[must_use]
    pub fn project_path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn is_git_repo(&self) -> bool {
        self.capabilities.is_git_repo
    }

    #[must_use]
    pub fn is_themed_doc_site(&self) -> bool {
        self.capabilities.is_themed_doc_site
    }

    pub fn subscribe(&mut self) -> StateReceiver<ProjectEvent> {
        self.subscribers.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_initial_state() {
        let project = ProjectContext::new();
        assert_eq!(project.project_path(), "");
        assert!(!project.is_git_repo());
        assert!(!project.is_themed_doc_site());
    }

    #[test]
    fn test_set_project_overwrites_without_validation() {
        let mut project = ProjectContext::new();
        project.set_project("/work/docs");
        project.set_project("not a real path");
        assert_eq!(project.project_path(), "not a real path");

        project.set_project("");
        assert_eq!(project.project_path(), "");
    }

    #[test]
    fn test_set_project_keeps_flags() {
        let mut project = ProjectContext::new().with_capabilities(ProjectCapabilities {
            is_git_repo: true,
            is_themed_doc_site: false,
        });
        project.set_project("/other");
        assert!(project.is_git_repo());
        assert!(!project.is_themed_doc_site());
    }

    #[test]
    fn test_path_changes_notified() {
        let mut project = ProjectContext::new();
        let events = project.subscribe();

        project.set_project("/a");
        project.set_project("/a");

        assert_eq!(
            events.drain(),
            vec![
                ProjectEvent::PathChanged("/a".to_owned()),
                ProjectEvent::PathChanged("/a".to_owned()),
            ]
        );
    }
}
