//! Container line arguments.
//!
//! Parses the info text and the `{#id .class key="value"}` attribute block
//! of a container line. The same attribute grammar is used for headings,
//! images and paragraphs.

use std::collections::HashMap;

/// Parsed arguments of a directive line.
///
/// # Example
///
/// ```
/// use scribe_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("Custom Title", r#"#intro .wide data-level="2""#);
/// assert_eq!(args.content, "Custom Title");
/// assert_eq!(args.id.as_deref(), Some("intro"));
/// assert_eq!(args.classes, vec!["wide"]);
/// assert_eq!(args.get("data-level"), Some("2"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Info text following the directive name (empty string if absent).
    pub content: String,
    /// `#name` from the attribute block.
    pub id: Option<String>,
    /// Every `.name`, in order.
    pub classes: Vec<String>,
    /// `key=value` pairs; a repeated key keeps the last value.
    pub attrs: HashMap<String, String>,
}

impl DirectiveArgs {
    /// Parse info text and an attribute string (without braces).
    ///
    /// Typographic quotes produced by smart punctuation are accepted in place
    /// of straight quotes.
    #[must_use]
    pub fn parse(content: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            content: content.to_owned(),
            ..Default::default()
        };

        if attrs_str.trim().is_empty() {
            return args;
        }

        let normalized = normalize_quotes(attrs_str);
        let mut remaining = normalized.trim();

        loop {
            remaining = remaining.trim_start();
            if remaining.is_empty() {
                break;
            }

            if let Some(rest) = remaining.strip_prefix('#') {
                let (name, rest) = split_name(rest);
                if !name.is_empty() {
                    args.id = Some(name.to_owned());
                }
                remaining = rest;
            } else if let Some(rest) = remaining.strip_prefix('.') {
                let (name, rest) = split_name(rest);
                if !name.is_empty() {
                    args.classes.push(name.to_owned());
                }
                remaining = rest;
            } else if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs.insert(key.into(), value.into());
                remaining = rest;
            } else {
                // Skip one unrecognized character
                let skip = remaining.chars().next().map_or(0, char::len_utf8);
                remaining = &remaining[skip..];
            }
        }

        args
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// True when no id, class or key-value attribute was parsed.
    #[must_use]
    pub fn has_no_attrs(&self) -> bool {
        self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }
}

/// Split an `#id` or `.class` name from the rest of the attribute string.
fn split_name(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len());
    (&s[..end], &s[end..])
}

fn normalize_quotes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

/// Split `key=value`, `key="value"` or `key='value'` off the front of `s`.
///
/// Returns `(key, value, rest)`; an unterminated quote is not a pair.
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let (key, value) = s.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) || key.starts_with(['#', '.']) {
        return None;
    }

    match value.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let (inner, rest) = value[1..].split_once(quote)?;
            Some((key, inner, rest))
        }
        _ => {
            let end = value.find(char::is_whitespace).unwrap_or(value.len());
            Some((key, &value[..end], &value[end..]))
        }
    }
}
