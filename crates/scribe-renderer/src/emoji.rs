//! Emoji shortcodes: `:smile:` → 😄.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static SHORTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-z0-9_+\-]+):").unwrap());

/// Replace known gemoji shortcodes in `text`.
///
/// Unknown shortcodes are left as written.
pub(crate) fn replace_shortcodes(text: &str) -> Cow<'_, str> {
    if !text.contains(':') {
        return Cow::Borrowed(text);
    }
    SHORTCODE.replace_all(text, |caps: &Captures<'_>| {
        emojis::get_by_shortcode(&caps[1])
            .map_or_else(|| caps[0].to_owned(), |emoji| emoji.as_str().to_owned())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_known_shortcodes() {
        assert_eq!(replace_shortcodes("Hi :smile:!"), "Hi 😄!");
        assert_eq!(replace_shortcodes(":+1: :tada:"), "👍 🎉");
    }

    #[test]
    fn test_unknown_shortcode_kept() {
        assert_eq!(replace_shortcodes("a :not_an_emoji_name: b"), "a :not_an_emoji_name: b");
    }

    #[test]
    fn test_plain_colons() {
        assert_eq!(replace_shortcodes("time 10:30:00"), "time 10:30:00");
        assert!(matches!(replace_shortcodes("no colons"), Cow::Borrowed(_)));
    }
}
