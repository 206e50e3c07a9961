//! Syntax highlighting for fenced code blocks.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::state::escape_html;

/// Class-based highlighter over syntect's bundled syntaxes.
///
/// Token spans carry `hljs-` prefixed scope classes; colors come from the
/// page stylesheet.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    class_style: ClassStyle,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            class_style: ClassStyle::SpacedPrefixed { prefix: "hljs-" },
        }
    }

    /// Whether `language` names a known syntax.
    #[must_use]
    pub fn supports(&self, language: &str) -> bool {
        self.find_syntax(language).is_some()
    }

    /// Write a fenced code block to `out`.
    ///
    /// Known languages produce `<pre class="hljs language-{lang}">` with
    /// highlighted spans. Unknown or absent languages, and highlighting
    /// failures, produce the escaped source under `language-text`.
    pub fn write_block(&self, language: Option<&str>, source: &str, out: &mut String) {
        if let Some(lang) = language
            && let Some(syntax) = self.find_syntax(lang)
        {
            match self.highlight(syntax, source) {
                Ok(highlighted) => {
                    out.push_str(r#"<pre class="hljs language-"#);
                    out.push_str(&escape_html(lang));
                    out.push_str(r#""><code>"#);
                    out.push_str(&highlighted);
                    out.push_str("</code></pre>\n");
                    return;
                }
                Err(err) => {
                    tracing::debug!(language = lang, error = %err, "Highlighting failed, using plain block");
                }
            }
        }

        out.push_str(r#"<pre class="hljs language-text"><code>"#);
        out.push_str(&escape_html(source));
        out.push_str("</code></pre>\n");
    }

    fn highlight(&self, syntax: &SyntaxReference, source: &str) -> Result<String, syntect::Error> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, self.class_style);

        for line in LinesWithEndings::from(source) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(generator.finalize())
    }

    fn find_syntax(&self, token: &str) -> Option<&SyntaxReference> {
        let lowercase = token.to_lowercase();
        self.syntax_set
            .find_syntax_by_token(&lowercase)
            .or_else(|| self.syntax_set.find_syntax_by_name(&lowercase))
            .or_else(|| self.syntax_set.find_syntax_by_extension(&lowercase))
    }
}
