//! Typographic replacements not covered by pulldown-cmark's smart punctuation.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static REPLACEMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\((?:c|r|tm)\)|\+-").unwrap());

/// Replace `(c)`, `(r)`, `(tm)` (any case) and `+-`.
pub(crate) fn replace_symbols(text: &str) -> Cow<'_, str> {
    if !text.contains(['(', '+']) {
        return Cow::Borrowed(text);
    }
    REPLACEMENTS.replace_all(text, |caps: &Captures<'_>| {
        match caps[0].to_ascii_lowercase().as_str() {
            "(c)" => "©",
            "(r)" => "®",
            "(tm)" => "™",
            _ => "±",
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_symbols() {
        assert_eq!(replace_symbols("(c) 2024 Acme(TM)"), "© 2024 Acme™");
        assert_eq!(replace_symbols("(R) and (r)"), "® and ®");
        assert_eq!(replace_symbols("5 +- 1"), "5 ± 1");
    }

    #[test]
    fn test_untouched() {
        assert_eq!(replace_symbols("(see above) a+b"), "(see above) a+b");
    }
}
