//! Generic `{#id .class key=value}` attributes.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::directive::DirectiveArgs;
use crate::state::escape_html;

/// Attributes attached to an element.
///
/// Key-value pairs are kept sorted so output is deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Attributes {
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) pairs: BTreeMap<String, String>,
}

impl Attributes {
    /// Parse an attribute string without the surrounding braces.
    pub(crate) fn parse(s: &str) -> Self {
        Self::from_args(DirectiveArgs::parse("", s))
    }

    pub(crate) fn from_args(args: DirectiveArgs) -> Self {
        let mut attrs = Self {
            id: args.id,
            classes: args.classes,
            pairs: args.attrs.into_iter().collect(),
        };
        if let Some(class) = attrs.pairs.remove("class") {
            attrs
                .classes
                .extend(class.split_whitespace().map(str::to_owned));
        }
        if let Some(id) = attrs.pairs.remove("id") {
            attrs.id = Some(id);
        }
        attrs
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.id.is_none() && self.classes.is_empty() && self.pairs.is_empty()
    }

    /// Split a trailing `{...}` block off `text`.
    ///
    /// Returns `None` when the text has no trailing block or the block holds
    /// no attributes, so plain braces in prose are left alone.
    pub(crate) fn split_trailing(text: &str) -> Option<(&str, Self)> {
        let trimmed = text.trim_end();
        if !trimmed.ends_with('}') {
            return None;
        }
        let open = trimmed.rfind('{')?;
        let attrs = Self::parse(&trimmed[open + 1..trimmed.len() - 1]);
        if attrs.is_empty() {
            return None;
        }
        Some((trimmed[..open].trim_end(), attrs))
    }

    /// Split a leading `{...}` block off `text`.
    pub(crate) fn split_leading(text: &str) -> Option<(Self, &str)> {
        if !text.starts_with('{') {
            return None;
        }
        let close = text.find('}')?;
        let attrs = Self::parse(&text[1..close]);
        if attrs.is_empty() {
            return None;
        }
        Some((attrs, &text[close + 1..]))
    }

    /// Write ` id=".." class=".." key=".."` with `base_classes` first.
    pub(crate) fn write_to(&self, out: &mut String, base_classes: &[&str]) {
        if let Some(id) = &self.id {
            let _ = write!(out, r#" id="{}""#, escape_html(id));
        }

        let classes: Vec<&str> = base_classes
            .iter()
            .copied()
            .chain(self.classes.iter().map(String::as_str))
            .collect();
        if !classes.is_empty() {
            let _ = write!(out, r#" class="{}""#, escape_html(&classes.join(" ")));
        }

        for (key, value) in &self.pairs {
            let _ = write!(out, r#" {}="{}""#, escape_html(key), escape_html(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(attrs: &Attributes, base: &[&str]) -> String {
        let mut out = String::new();
        attrs.write_to(&mut out, base);
        out
    }

    #[test]
    fn test_write_sorted_and_escaped() {
        let attrs = Attributes::parse(r#"#top .a width=10 alt="x<y""#);
        assert_eq!(
            render(&attrs, &["base"]),
            r#" id="top" class="base a" alt="x&lt;y" width="10""#
        );
    }

    #[test]
    fn test_class_key_merges() {
        let attrs = Attributes::parse(r#".a class="b c""#);
        assert_eq!(attrs.classes, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_trailing() {
        let (text, attrs) = Attributes::split_trailing("Some text {.lead}").unwrap();
        assert_eq!(text, "Some text");
        assert_eq!(attrs.classes, vec!["lead"]);
    }

    #[test]
    fn test_split_trailing_ignores_plain_braces() {
        assert_eq!(Attributes::split_trailing("set {x}"), None);
        assert_eq!(Attributes::split_trailing("no braces"), None);
    }

    #[test]
    fn test_split_leading() {
        let (attrs, rest) = Attributes::split_leading("{width=50} caption").unwrap();
        assert_eq!(attrs.pairs.get("width").map(String::as_str), Some("50"));
        assert_eq!(rest, " caption");
    }
}
