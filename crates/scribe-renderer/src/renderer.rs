//! The configured document renderer.

use pulldown_cmark::{Options, Parser, TextMergeStream};

use crate::containers::{ContainerKind, CustomContainer};
use crate::directive::DirectiveProcessor;
use crate::highlight::Highlighter;
use crate::state::TocEntry;
use crate::writer::HtmlWriter;

/// Result of rendering markdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Table of contents entries, in document order.
    pub toc: Vec<TocEntry>,
    /// Structural problems found while rendering (e.g., unclosed containers).
    pub warnings: Vec<String>,
}

/// Markdown renderer with a fixed feature set.
///
/// Immutable after construction and safe to share between threads. Each
/// [`render`](Self::render) call builds its own directive processor and
/// writer.
pub struct MarkdownRenderer {
    highlighter: Highlighter,
}

/// Build the shared renderer.
///
/// # Example
///
/// ```
/// use scribe_renderer::create_markdown_renderer;
///
/// let renderer = create_markdown_renderer();
/// let result = renderer.render("::: tip\nHello :wave:\n:::");
/// assert!(result.html.contains(r#"<div class="custom-container tip">"#));
/// assert!(result.html.contains("👋"));
/// ```
#[must_use]
pub fn create_markdown_renderer() -> MarkdownRenderer {
    MarkdownRenderer::new()
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            highlighter: Highlighter::new(),
        }
    }

    /// Parser options: tables, strikethrough, task lists, footnotes,
    /// heading attributes and smart punctuation.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_SMART_PUNCTUATION
    }

    /// Render a markdown document to HTML.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        let mut directives = ContainerKind::ALL
            .into_iter()
            .fold(DirectiveProcessor::new(), |processor, kind| {
                processor.with_container(CustomContainer::new(kind))
            });
        let preprocessed = directives.process(markdown);

        let parser = Parser::new_ext(&preprocessed, Self::parser_options());
        let writer = HtmlWriter::new(&self.highlighter, preprocessed.len() * 3 / 2);
        let (html, toc) = writer.run(TextMergeStream::new(parser));

        let warnings = directives.warnings();
        for warning in &warnings {
            tracing::debug!(%warning, "Markdown render warning");
        }

        RenderResult {
            html,
            toc,
            warnings,
        }
    }
}
