//! State structs tracking context during event processing.

use std::collections::HashMap;
use std::fmt::Write;

use pulldown_cmark::Alignment;

/// State for tracking code block rendering.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    /// Fenced blocks are highlighted, indented blocks are not.
    fenced: bool,
    /// First word of the fence info string.
    language: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    pub(crate) fn start_fenced(&mut self, info: &str) {
        self.active = true;
        self.fenced = true;
        self.language = info.split_whitespace().next().map(str::to_owned);
        self.buffer.clear();
    }

    pub(crate) fn start_indented(&mut self) {
        self.active = true;
        self.fenced = false;
        self.language = None;
        self.buffer.clear();
    }

    /// End the current code block and return (fenced, language, content).
    pub(crate) fn end(&mut self) -> (bool, Option<String>, String) {
        self.active = false;
        (
            self.fenced,
            self.language.take(),
            std::mem::take(&mut self.buffer),
        )
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Alignment style attribute for the current cell.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// An image whose alt text is being captured.
#[derive(Debug, Default)]
pub(crate) struct ImageState {
    active: bool,
    src: String,
    title: String,
    alt_text: String,
}

/// A completed image, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingImage {
    pub(crate) src: String,
    pub(crate) title: String,
    pub(crate) alt: String,
}

impl ImageState {
    pub(crate) fn start(&mut self, src: &str, title: &str) {
        self.active = true;
        src.clone_into(&mut self.src);
        title.clone_into(&mut self.title);
        self.alt_text.clear();
    }

    pub(crate) fn end(&mut self) -> PendingImage {
        self.active = false;
        PendingImage {
            src: std::mem::take(&mut self.src),
            title: std::mem::take(&mut self.title),
            alt: std::mem::take(&mut self.alt_text),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// A heading whose content is being buffered.
struct OpenHeading {
    level: u8,
    explicit_id: Option<String>,
}

/// A completed heading ready to be written.
pub(crate) struct CompletedHeading {
    pub(crate) level: u8,
    pub(crate) id: String,
    pub(crate) html: String,
}

/// Heading capture, unique anchor ids and table of contents.
#[derive(Default)]
pub(crate) struct HeadingState {
    current: Option<OpenHeading>,
    /// Plain text of the heading (for the slug and ToC).
    text: String,
    /// Inline HTML of the heading.
    html: String,
    toc: Vec<TocEntry>,
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn start_heading(&mut self, level: u8, explicit_id: Option<String>) {
        self.current = Some(OpenHeading { level, explicit_id });
        self.text.clear();
        self.html.clear();
    }

    /// Complete the heading and record its ToC entry.
    pub(crate) fn complete_heading(&mut self) -> Option<CompletedHeading> {
        let heading = self.current.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);

        let id = match heading.explicit_id {
            Some(id) => {
                self.id_counts.entry(id.clone()).or_insert(1);
                id
            }
            None => self.generate_id(&text),
        };

        self.toc.push(TocEntry {
            level: heading.level,
            title: text.trim().to_owned(),
            id: id.clone(),
        });

        Some(CompletedHeading {
            level: heading.level,
            id,
            html,
        })
    }

    /// Generate a unique ID: `slug`, `slug-1`, `slug-2`, ...
    fn generate_id(&mut self, text: &str) -> String {
        let mut base_id = slugify(text);
        if base_id.is_empty() {
            base_id = "section".to_owned();
        }
        loop {
            let count = self.id_counts.entry(base_id.clone()).or_default();
            let id = match *count {
                0 => base_id.clone(),
                n => format!("{base_id}-{n}"),
            };
            *count += 1;
            // A generated suffix may collide with a heading literally named `slug-1`
            if id == base_id || !self.id_counts.contains_key(&id) {
                self.id_counts.entry(id.clone()).or_insert(1);
                return id;
            }
        }
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn html_buffer(&mut self) -> &mut String {
        &mut self.html
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// Footnote numbering and buffered definitions.
///
/// Footnotes are numbered in order of first reference. Only referenced
/// definitions are listed in the trailing section.
#[derive(Default)]
pub(crate) struct FootnoteState {
    numbers: HashMap<String, usize>,
    /// Labels by number - 1, with their reference count.
    order: Vec<(String, usize)>,
    definitions: HashMap<String, String>,
}

impl FootnoteState {
    /// Register a reference and return (number, zero-based reference index).
    pub(crate) fn reference(&mut self, label: &str) -> (usize, usize) {
        if let Some(&number) = self.numbers.get(label) {
            let entry = &mut self.order[number - 1];
            let index = entry.1;
            entry.1 += 1;
            return (number, index);
        }
        self.order.push((label.to_owned(), 1));
        let number = self.order.len();
        self.numbers.insert(label.to_owned(), number);
        (number, 0)
    }

    pub(crate) fn define(&mut self, label: &str, html: String) {
        self.definitions.entry(label.to_owned()).or_insert(html);
    }

    /// Render the footnotes section, or `None` when nothing was referenced.
    pub(crate) fn finish(&mut self) -> Option<String> {
        if self.order.is_empty() {
            return None;
        }

        let mut out = String::from(
            "<hr class=\"footnotes-sep\">\n<section class=\"footnotes\">\n<ol class=\"footnotes-list\">\n",
        );

        for (idx, (label, refs)) in self.order.iter().enumerate() {
            let number = idx + 1;
            let mut backrefs = String::new();
            for ref_index in 0..*refs {
                let _ = write!(
                    backrefs,
                    r##" <a href="#{}" class="footnote-backref">↩︎</a>"##,
                    footnote_ref_id(number, ref_index)
                );
            }

            let body = self.definitions.remove(label).unwrap_or_default();
            let body = body.trim_end();
            let _ = write!(out, r#"<li id="fn{number}" class="footnote-item">"#);
            match body.strip_suffix("</p>") {
                Some(head) => {
                    let _ = write!(out, "{head}{backrefs}</p>");
                }
                None => {
                    let _ = write!(out, "{body}<p>{}</p>", backrefs.trim_start());
                }
            }
            out.push_str("\n</li>\n");
        }

        out.push_str("</ol>\n</section>\n");
        Some(out)
    }
}

/// Anchor id of a footnote reference: `fnref1`, then `fnref1:1`, ...
pub(crate) fn footnote_ref_id(number: usize, ref_index: usize) -> String {
    if ref_index == 0 {
        format!("fnref{number}")
    } else {
        format!("fnref{number}:{ref_index}")
    }
}

/// Convert heading text to an anchor slug.
///
/// Lowercases, turns whitespace runs into single dashes, keeps letters,
/// digits, dashes and underscores from any script.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut pending_dash = false;

    for c in text.trim().chars() {
        if c.is_whitespace() {
            pending_dash = !result.is_empty();
        } else if c.is_alphanumeric() || c == '-' || c == '_' {
            if pending_dash {
                result.push('-');
                pending_dash = false;
            }
            result.extend(c.to_lowercase());
        }
    }

    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(slugify("snake_case"), "snake_case");
        assert_eq!(slugify("Привет мир"), "привет-мир");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_code_block_language_is_first_word() {
        let mut state = CodeBlockState::default();
        state.start_fenced("rust ignore title=\"x\"");
        state.push_str("fn main() {}\n");
        assert_eq!(
            state.end(),
            (true, Some("rust".to_owned()), "fn main() {}\n".to_owned())
        );
        assert!(!state.is_active());
    }

    #[test]
    fn test_table_alignment() {
        let mut state = TableState::default();
        state.start(vec![Alignment::None, Alignment::Right]);
        state.start_row();
        assert_eq!(state.current_alignment_style(), "");
        state.next_cell();
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:right""#
        );
    }

    #[test]
    fn test_unique_heading_ids() {
        let mut state = HeadingState::default();
        let mut ids = Vec::new();
        for text in ["Intro", "Intro", "Intro-1", "Intro"] {
            state.start_heading(2, None);
            state.push_text(text);
            ids.push(state.complete_heading().unwrap().id);
        }
        assert_eq!(ids, vec!["intro", "intro-1", "intro-1-1", "intro-2"]);
    }

    #[test]
    fn test_explicit_heading_id() {
        let mut state = HeadingState::default();
        state.start_heading(1, Some("custom".to_owned()));
        state.push_text("Title");
        let heading = state.complete_heading().unwrap();
        assert_eq!(heading.id, "custom");
        assert_eq!(
            state.take_toc(),
            vec![TocEntry {
                level: 1,
                title: "Title".to_owned(),
                id: "custom".to_owned(),
            }]
        );
    }

    #[test]
    fn test_footnote_numbering() {
        let mut state = FootnoteState::default();
        assert_eq!(state.reference("b"), (1, 0));
        assert_eq!(state.reference("a"), (2, 0));
        assert_eq!(state.reference("b"), (1, 1));
        assert_eq!(footnote_ref_id(1, 1), "fnref1:1");
    }

    #[test]
    fn test_footnote_section() {
        let mut state = FootnoteState::default();
        state.reference("n");
        state.define("n", "<p>Note.</p>\n".to_owned());
        state.define("unused", "<p>Dropped.</p>\n".to_owned());
        assert_eq!(
            state.finish().unwrap(),
            "<hr class=\"footnotes-sep\">\n<section class=\"footnotes\">\n<ol class=\"footnotes-list\">\n\
             <li id=\"fn1\" class=\"footnote-item\"><p>Note. <a href=\"#fnref1\" class=\"footnote-backref\">↩︎</a></p>\n</li>\n\
             </ol>\n</section>\n"
        );
    }

    #[test]
    fn test_no_footnotes() {
        assert_eq!(FootnoteState::default().finish(), None);
    }
}
