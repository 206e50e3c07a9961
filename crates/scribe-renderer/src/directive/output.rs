//! Directive output types.

/// Output of a container directive's opening line.
///
/// # Example
///
/// ```
/// use scribe_renderer::directive::DirectiveOutput;
///
/// let output = DirectiveOutput::html("<div class=\"box\">");
/// assert!(matches!(output, DirectiveOutput::Html(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// HTML that passes through pulldown-cmark unchanged.
    Html(String),
    /// Don't handle this directive (the line is kept verbatim).
    Skip,
}

impl DirectiveOutput {
    /// Create an HTML output.
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }
}
