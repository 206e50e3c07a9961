//! Markdown to HTML renderer for documentation pages.
//!
//! A single [`MarkdownRenderer`] built by [`create_markdown_renderer`] is
//! shared by the whole application. It renders:
//!
//! - raw HTML verbatim, bare URLs as links, typographic punctuation
//! - fenced code with syntect class-based highlighting (`hljs-` classes)
//! - task lists, footnotes, emoji shortcodes and anchored headings
//! - `{#id .class key=value}` attributes on headings, images and paragraphs
//! - image-only paragraphs as `<figure>` with a caption from the image title
//! - custom containers (`::: tip`, `::: details`, `:::: code-group`, ...)
//!
//! # Example
//!
//! ```
//! use scribe_renderer::create_markdown_renderer;
//!
//! let renderer = create_markdown_renderer();
//! let result = renderer.render("# Hello\n\n**Bold** text");
//! assert!(result.html.contains("<strong>Bold</strong>"));
//! assert_eq!(result.toc[0].id, "hello");
//! ```

mod attrs;
mod containers;
pub mod directive;
mod emoji;
mod fence;
mod highlight;
mod linkify;
mod renderer;
mod state;
mod typographer;
mod util;
mod writer;

pub use containers::ContainerKind;
pub use highlight::Highlighter;
pub use renderer::{MarkdownRenderer, RenderResult, create_markdown_renderer};
pub use state::{TocEntry, escape_html, slugify};
