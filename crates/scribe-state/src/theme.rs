//! Dark/light theme preference.

use crate::event::{StateReceiver, Subscribers};
use crate::presentation::{ColorScheme, DocumentRoot};
use crate::storage::PreferenceStore;

/// Storage key of the persisted theme.
pub const THEME_KEY: &str = "theme";

/// Class toggled on the document root in dark mode.
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeEvent {
    Changed { dark: bool },
}

/// The theme preference and its side effects.
///
/// After construction and after every mutator the persisted value, the root
/// class and the color-scheme hint all agree with [`is_dark`](Self::is_dark).
pub struct ThemeStore<S, R> {
    dark: bool,
    storage: S,
    root: R,
    subscribers: Subscribers<ThemeEvent>,
}

impl<S: PreferenceStore, R: DocumentRoot> ThemeStore<S, R> {
    /// Load the preference and apply it to `root`.
    ///
    /// A persisted `"dark"` selects dark mode and any other non-empty value
    /// selects light. When nothing (or an empty string) is persisted,
    /// `ambient` supplies the system preference.
    pub fn new(storage: S, root: R, ambient: impl FnOnce() -> bool) -> Self {
        let dark = match storage.get(THEME_KEY) {
            Some(saved) if !saved.is_empty() => saved == "dark",
            _ => ambient(),
        };

        let mut store = Self {
            dark,
            storage,
            root,
            subscribers: Subscribers::default(),
        };
        store.apply();
        store
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    #[must_use]
    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme::from_dark(self.dark)
    }

    /// Flip the theme. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.set_dark(!self.dark);
        self.dark
    }

    /// Select dark (`true`) or light mode. Setting the current value does nothing.
    pub fn set_dark(&mut self, dark: bool) {
        if self.dark == dark {
            return;
        }
        self.dark = dark;
        self.apply();
        self.subscribers.notify(&ThemeEvent::Changed { dark });
    }

    pub fn subscribe(&mut self) -> StateReceiver<ThemeEvent> {
        self.subscribers.subscribe()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    fn apply(&mut self) {
        let scheme = self.color_scheme();
        if let Err(e) = self.storage.set(THEME_KEY, scheme.as_str()) {
            tracing::warn!(error = %e, theme = scheme.as_str(), "Failed to persist theme preference");
        }
        self.root.set_class(DARK_CLASS, self.dark);
        self.root.set_color_scheme(scheme);
        tracing::debug!(theme = scheme.as_str(), "Applied theme");
    }
}
