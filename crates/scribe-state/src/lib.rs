//! Application state for the Scribe editor.
//!
//! Three independent containers make up the shared application context:
//!
//! - [`ToastQueue`]: transient notifications with per-toast expiry
//! - [`ThemeStore`]: the dark/light preference, persisted through a
//!   [`PreferenceStore`] and applied to a [`DocumentRoot`]
//! - [`ProjectContext`]: the open project path and its capability flags
//!
//! Each container is owned by [`AppContext`] and mutated through `&mut`
//! methods; observers [`subscribe`](ToastQueue::subscribe) to receive change
//! events over a channel.
//!
//! # Example
//!
//! ```
//! use scribe_state::{AppContext, MemoryPreferences, RootAttributes, ToastKind};
//!
//! let mut app = AppContext::new(MemoryPreferences::new(), RootAttributes::new(), || false);
//! let events = app.toasts.subscribe();
//!
//! app.theme.toggle();
//! app.toasts.add("Switched to dark mode");
//!
//! assert!(app.theme.root().has_class("dark"));
//! assert_eq!(events.drain().len(), 1);
//! ```

mod clock;
mod error;
mod event;
mod presentation;
mod project;
mod storage;
mod theme;
mod toast;

#[cfg(any(test, feature = "mock"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use error::StateError;
pub use event::StateReceiver;
pub use presentation::{ColorScheme, DocumentRoot, RootAttributes};
pub use project::{ProjectCapabilities, ProjectContext, ProjectEvent};
pub use storage::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use theme::{DARK_CLASS, THEME_KEY, ThemeEvent, ThemeStore};
pub use toast::{DEFAULT_TOAST_DURATION, Toast, ToastEvent, ToastId, ToastKind, ToastQueue};

/// The state shared by the whole application.
pub struct AppContext<S, R> {
    pub toasts: ToastQueue,
    pub theme: ThemeStore<S, R>,
    pub project: ProjectContext,
}

impl<S: PreferenceStore, R: DocumentRoot> AppContext<S, R> {
    /// Create the context with an empty toast queue and no open project.
    ///
    /// The theme is loaded from `storage` (falling back to `ambient`) and
    /// applied to `root` immediately.
    pub fn new(storage: S, root: R, ambient: impl FnOnce() -> bool) -> Self {
        Self {
            toasts: ToastQueue::new(),
            theme: ThemeStore::new(storage, root, ambient),
            project: ProjectContext::new(),
        }
    }

    /// Replace the toast queue (e.g., to change its clock or default duration).
    #[must_use]
    pub fn with_toasts(mut self, toasts: ToastQueue) -> Self {
        self.toasts = toasts;
        self
    }

    /// Replace the project context.
    #[must_use]
    pub fn with_project(mut self, project: ProjectContext) -> Self {
        self.project = project;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_containers_are_independent() {
        let clock = ManualClock::new();
        let mut app = AppContext::new(MemoryPreferences::new(), RootAttributes::new(), || true)
            .with_toasts(ToastQueue::with_clock(clock.clone()))
            .with_project(ProjectContext::new().with_capabilities(ProjectCapabilities {
                is_git_repo: true,
                is_themed_doc_site: true,
            }));

        app.toasts.add("hello");
        app.project.set_project("/docs");
        app.theme.toggle();

        clock.advance(DEFAULT_TOAST_DURATION + Duration::from_millis(1));
        app.toasts.expire();

        assert!(app.toasts.is_empty());
        assert!(!app.theme.is_dark());
        assert_eq!(app.project.project_path(), "/docs");
        assert!(app.project.is_git_repo());
    }
}
