//! The document root the theme is applied to.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Color scheme hint for built-in UI (scrollbars, form controls).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation hooks of the root element.
pub trait DocumentRoot {
    /// Add or remove a class on the root element.
    fn set_class(&mut self, class: &str, enabled: bool);

    /// Set the color-scheme style hint.
    fn set_color_scheme(&mut self, scheme: ColorScheme);
}

/// In-memory root element state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RootAttributes {
    classes: BTreeSet<String>,
    color_scheme: Option<ColorScheme>,
}

impl RootAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Classes in sorted order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    #[must_use]
    pub fn color_scheme(&self) -> Option<ColorScheme> {
        self.color_scheme
    }
}

impl DocumentRoot for RootAttributes {
    fn set_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert(class.to_owned());
        } else {
            self.classes.remove(class);
        }
    }

    fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.color_scheme = Some(scheme);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_class_toggle() {
        let mut root = RootAttributes::new();
        root.set_class("dark", true);
        root.set_class("wide", true);
        assert!(root.has_class("dark"));
        assert_eq!(root.classes().collect::<Vec<_>>(), vec!["dark", "wide"]);

        root.set_class("dark", false);
        assert!(!root.has_class("dark"));
    }

    #[test]
    fn test_color_scheme() {
        let mut root = RootAttributes::new();
        assert_eq!(root.color_scheme(), None);
        root.set_color_scheme(ColorScheme::from_dark(true));
        assert_eq!(root.color_scheme(), Some(ColorScheme::Dark));
        assert_eq!(ColorScheme::Light.to_string(), "light");
    }
}
