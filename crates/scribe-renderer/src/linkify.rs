//! Bare URL detection in text.

use std::sync::LazyLock;

use regex::Regex;

use crate::state::escape_html;

static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<>]+").unwrap());

/// Escape `text` into `out`, turning bare `http://`, `https://` and `www.`
/// URLs into links.
pub(crate) fn write_linkified(text: &str, out: &mut String) {
    let mut last = 0;

    for found in BARE_URL.find_iter(text) {
        let url = trim_trailing_punctuation(found.as_str());
        // A lone scheme or `www.` is not a link
        if url.len() <= "https://".len() && !url.contains('.') {
            continue;
        }

        out.push_str(&escape_html(&text[last..found.start()]));

        let href = if url.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("www.")) {
            format!("http://{url}")
        } else {
            url.to_owned()
        };
        out.push_str(r#"<a href=""#);
        out.push_str(&escape_html(&href));
        out.push_str(r#"">"#);
        out.push_str(&escape_html(url));
        out.push_str("</a>");

        last = found.start() + url.len();
    }

    out.push_str(&escape_html(&text[last..]));
}

/// Drop sentence punctuation after a URL; keep `)` when it closes a `(` inside the URL.
fn trim_trailing_punctuation(url: &str) -> &str {
    let mut end = url.len();
    while let Some(c) = url[..end].chars().next_back() {
        let keep = match c {
            '.' | ',' | ':' | ';' | '!' | '?' | '"' | '\'' | '*' | '_' | '~' => false,
            ')' => {
                let candidate = &url[..end];
                candidate.matches('(').count() >= candidate.matches(')').count()
            }
            _ => true,
        };
        if keep {
            break;
        }
        end -= c.len_utf8();
    }
    &url[..end]
}
