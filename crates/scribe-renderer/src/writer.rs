//! Per-document HTML writer over pulldown-cmark events.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};

use crate::attrs::Attributes;
use crate::emoji::replace_shortcodes;
use crate::highlight::Highlighter;
use crate::linkify::write_linkified;
use crate::state::{
    CodeBlockState, FootnoteState, HeadingState, ImageState, PendingImage, TableState, TocEntry,
    escape_html, footnote_ref_id,
};
use crate::typographer::replace_symbols;
use crate::util::{heading_level_to_num, unescape_html};

/// An open `<ul>` / `<ol>`.
struct ListFrame {
    /// Output offset right after `<ul` / `<ol`.
    open_pos: usize,
    has_tasks: bool,
}

/// The paragraph being written.
#[derive(Default)]
struct ParagraphFrame {
    /// Output offset of `<p`.
    start: usize,
    images: usize,
    /// Title and classes of the last image.
    last_image: Option<(String, Vec<String>)>,
    /// Any inline content other than images and whitespace.
    other_content: bool,
}

/// A footnote definition being captured into its own buffer.
struct FootnoteCapture {
    label: String,
    saved_output: String,
}

/// Writes HTML for one document.
///
/// Created per render call; holds all mutable state so the renderer itself
/// stays shared and immutable.
pub(crate) struct HtmlWriter<'h> {
    highlighter: &'h Highlighter,
    output: String,
    lists: Vec<ListFrame>,
    /// Output offsets right after each open `<li`.
    items: Vec<usize>,
    paragraph: Option<ParagraphFrame>,
    /// An image waiting to see whether `{attrs}` follow it.
    held_image: Option<PendingImage>,
    link_depth: usize,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    /// Classes and attributes of the open heading.
    heading_extra: Option<Attributes>,
    footnotes: FootnoteState,
    footnote_capture: Option<FootnoteCapture>,
}

impl<'h> HtmlWriter<'h> {
    pub(crate) fn new(highlighter: &'h Highlighter, capacity: usize) -> Self {
        Self {
            highlighter,
            output: String::with_capacity(capacity),
            lists: Vec::new(),
            items: Vec::new(),
            paragraph: None,
            held_image: None,
            link_depth: 0,
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            heading_extra: None,
            footnotes: FootnoteState::default(),
            footnote_capture: None,
        }
    }

    /// Write all events and return the HTML and table of contents.
    pub(crate) fn run<'a, I>(mut self, events: I) -> (String, Vec<TocEntry>)
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        self.flush_held_image();

        if let Some(section) = self.footnotes.finish() {
            self.output.push_str(&section);
        }

        (self.output, self.heading.take_toc())
    }

    fn process_event(&mut self, event: Event<'_>) {
        if let Some(image) = self.held_image.take() {
            if let Event::Text(text) = &event
                && let Some((attrs, rest)) = Attributes::split_leading(text)
            {
                self.write_image(image, &attrs);
                if !rest.is_empty() {
                    self.text(rest);
                }
                return;
            }
            self.write_image(image, &Attributes::default());
        }

        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => self.output.push_str(&html),
            Event::InlineHtml(html) => {
                self.mark_content();
                self.push_inline(&html);
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                self.mark_content();
                let escaped = escape_html(&math);
                self.push_inline(&escaped);
            }
            Event::FootnoteReference(label) => self.footnote_reference(&label),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => {
                self.mark_content();
                self.push_inline("<br>\n");
            }
            Event::Rule => self.output.push_str("<hr>\n"),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.paragraph = Some(ParagraphFrame {
                    start: self.output.len(),
                    ..ParagraphFrame::default()
                });
                self.output.push_str("<p>");
            }
            Tag::Heading {
                level,
                id,
                classes,
                attrs,
            } => {
                // Opening tag is written in end_tag once the id is known
                let extra = heading_attributes(classes, attrs);
                self.heading
                    .start_heading(heading_level_to_num(level), id.map(|id| id.to_string()));
                self.heading_extra = Some(extra);
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>\n"),
            Tag::CodeBlock(kind) => match kind {
                CodeBlockKind::Fenced(info) => self.code.start_fenced(&info),
                CodeBlockKind::Indented => self.code.start_indented(),
            },
            Tag::List(start) => {
                let tag = if start.is_some() { "<ol" } else { "<ul" };
                self.output.push_str(tag);
                self.lists.push(ListFrame {
                    open_pos: self.output.len(),
                    has_tasks: false,
                });
                match start {
                    Some(1) | None => self.output.push_str(">\n"),
                    Some(n) => {
                        let _ = write!(self.output, r#" start="{n}">"#);
                        self.output.push('\n');
                    }
                }
            }
            Tag::Item => {
                self.output.push_str("<li");
                self.items.push(self.output.len());
                self.output.push('>');
            }
            Tag::FootnoteDefinition(label) => {
                self.footnote_capture = Some(FootnoteCapture {
                    label: label.to_string(),
                    saved_output: std::mem::take(&mut self.output),
                });
            }
            Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>\n"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>\n");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead>\n<tr>\n");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>\n");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let _ = write!(self.output, "<{tag}{align}>");
            }
            Tag::Emphasis => self.open_inline("<em>"),
            Tag::Strong => self.open_inline("<strong>"),
            Tag::Strikethrough => self.open_inline("<s>"),
            Tag::Superscript => self.open_inline("<sup>"),
            Tag::Subscript => self.open_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                self.link_depth += 1;
                let mut link = format!(r#"<a href="{}""#, escape_html(&dest_url));
                if !title.is_empty() {
                    let _ = write!(link, r#" title="{}""#, escape_html(&title));
                }
                link.push('>');
                self.open_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the end tag
                self.image.start(&dest_url, &title);
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.end_paragraph(),
            TagEnd::Heading(_) => self.end_heading(),
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>\n"),
            TagEnd::CodeBlock => {
                let (fenced, language, content) = self.code.end();
                if fenced {
                    self.highlighter
                        .write_block(language.as_deref(), &content, &mut self.output);
                } else {
                    let escaped = escape_html(&content);
                    let _ = writeln!(self.output, "<pre><code>{escaped}</code></pre>");
                }
            }
            TagEnd::List(ordered) => {
                self.lists.pop();
                self.output
                    .push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            TagEnd::Item => {
                self.items.pop();
                self.output.push_str("</li>\n");
            }
            TagEnd::FootnoteDefinition => {
                if let Some(capture) = self.footnote_capture.take() {
                    let html = std::mem::replace(&mut self.output, capture.saved_output);
                    self.footnotes.define(&capture.label, html);
                }
            }
            TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>\n"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>\n"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>\n"),
            TagEnd::Table => self.output.push_str("</tbody>\n</table>\n"),
            TagEnd::TableHead => {
                self.output.push_str("</tr>\n</thead>\n<tbody>\n");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>\n"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>\n"
                } else {
                    "</td>\n"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => {
                self.link_depth = self.link_depth.saturating_sub(1);
                self.push_inline("</a>");
            }
            TagEnd::Image => {
                let image = self.image.end();
                self.held_image = Some(image);
            }
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }

        let symbols = replace_symbols(text);
        let decorated = replace_shortcodes(&symbols);

        if self.image.is_active() {
            self.image.push_str(&decorated);
        } else if self.heading.is_active() {
            self.heading.push_text(&decorated);
            self.heading
                .html_buffer()
                .push_str(&escape_html(&decorated));
        } else {
            if !decorated.trim().is_empty() {
                self.mark_content();
            }
            if self.link_depth > 0 {
                self.output.push_str(&escape_html(&decorated));
            } else {
                write_linkified(&decorated, &mut self.output);
            }
        }
    }

    fn inline_code(&mut self, code: &str) {
        self.mark_content();
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        let html = format!("<code>{}</code>", escape_html(code));
        self.push_inline(&html);
    }

    fn soft_break(&mut self) {
        if self.heading.is_active() {
            self.heading.push_text(" ");
            self.heading.html_buffer().push('\n');
        } else if self.image.is_active() {
            self.image.push_str(" ");
        } else {
            self.output.push('\n');
        }
    }

    fn footnote_reference(&mut self, label: &str) {
        self.mark_content();
        let (number, ref_index) = self.footnotes.reference(label);
        let html = format!(
            r##"<sup class="footnote-ref"><a href="#fn{number}" id="{}">[{number}]</a></sup>"##,
            footnote_ref_id(number, ref_index)
        );
        self.push_inline(&html);
    }

    fn task_list_marker(&mut self, checked: bool) {
        if let Some(&item_pos) = self.items.last() {
            self.insert_at(item_pos, r#" class="task-list-item""#);
        }
        if let Some(list) = self.lists.last()
            && !list.has_tasks
        {
            let open_pos = list.open_pos;
            self.insert_at(open_pos, r#" class="contains-task-list""#);
            if let Some(list) = self.lists.last_mut() {
                list.has_tasks = true;
            }
        }

        self.output
            .push_str(r#"<input class="task-list-item-checkbox" type="checkbox" disabled"#);
        if checked {
            self.output.push_str(" checked");
        }
        self.output.push_str("> ");
    }

    fn end_heading(&mut self) {
        let extra = self.heading_extra.take().unwrap_or_default();
        let Some(heading) = self.heading.complete_heading() else {
            return;
        };

        let attrs = Attributes {
            id: Some(heading.id.clone()),
            ..extra
        };
        let level = heading.level;
        let _ = write!(self.output, "<h{level}");
        attrs.write_to(&mut self.output, &[]);
        let _ = writeln!(
            self.output,
            r##" tabindex="-1"><a class="header-anchor" href="#{}">{}</a></h{level}>"##,
            escape_html(&heading.id),
            heading.html.trim()
        );
    }

    fn end_paragraph(&mut self) {
        self.flush_held_image();
        let Some(frame) = self.paragraph.take() else {
            self.output.push_str("</p>\n");
            return;
        };

        if frame.images == 1
            && !frame.other_content
            && let Some((title, classes)) = frame.last_image
        {
            self.write_figure(frame.start, &title, &classes);
            return;
        }

        if let Some(attrs) = self.take_trailing_attrs(frame.start) {
            let mut tag = String::new();
            attrs.write_to(&mut tag, &[]);
            // Right after `<p`
            self.insert_at(frame.start + 2, &tag);
        }
        self.output.push_str("</p>\n");
    }

    /// Remove a trailing `{...}` attribute block from the paragraph text.
    fn take_trailing_attrs(&mut self, start: usize) -> Option<Attributes> {
        let body = &self.output[start..];
        if !body.trim_end().ends_with('}') {
            return None;
        }
        let open = body.rfind('{')?;
        let block = &body[open..];
        if block.contains('<') {
            return None;
        }

        let unescaped = unescape_html(block);
        let (before, attrs) = Attributes::split_trailing(&unescaped)?;
        if !before.is_empty() {
            return None;
        }

        let cut = self.output[..start + open].trim_end().len();
        self.output.truncate(cut);
        Some(attrs)
    }

    /// Replace `<p><img ...>` at `start` with a figure.
    fn write_figure(&mut self, start: usize, title: &str, classes: &[String]) {
        let body = self.output.split_off(start);
        let image = body.trim_start_matches("<p>").trim();

        self.output.push_str("<figure");
        if !classes.is_empty() {
            let _ = write!(self.output, r#" class="{}""#, escape_html(&classes.join(" ")));
        }
        self.output.push('>');
        self.output.push_str(image);
        if !title.is_empty() {
            let _ = write!(self.output, "<figcaption>{}</figcaption>", escape_html(title));
        }
        self.output.push_str("</figure>\n");
    }

    fn flush_held_image(&mut self) {
        if let Some(image) = self.held_image.take() {
            self.write_image(image, &Attributes::default());
        }
    }

    fn write_image(&mut self, image: PendingImage, attrs: &Attributes) {
        let mut html = format!(
            r#"<img src="{}" alt="{}""#,
            escape_html(&image.src),
            escape_html(&image.alt)
        );
        if !image.title.is_empty() {
            let _ = write!(html, r#" title="{}""#, escape_html(&image.title));
        }
        attrs.write_to(&mut html, &[]);
        html.push('>');

        if self.heading.is_active() {
            self.heading.html_buffer().push_str(&html);
        } else {
            if let Some(frame) = &mut self.paragraph {
                frame.images += 1;
                frame.last_image = Some((image.title, attrs.classes.clone()));
            }
            self.output.push_str(&html);
        }
    }

    /// Open an inline element. Counts as paragraph content.
    fn open_inline(&mut self, html: &str) {
        self.mark_content();
        self.push_inline(html);
    }

    /// Push content to output or heading buffer based on context.
    fn push_inline(&mut self, html: &str) {
        if self.heading.is_active() {
            self.heading.html_buffer().push_str(html);
        } else {
            self.output.push_str(html);
        }
    }

    fn mark_content(&mut self) {
        if !self.image.is_active()
            && !self.heading.is_active()
            && let Some(frame) = &mut self.paragraph
        {
            frame.other_content = true;
        }
    }

    /// Insert into the output, shifting every recorded offset after `pos`.
    fn insert_at(&mut self, pos: usize, s: &str) {
        self.output.insert_str(pos, s);
        let offsets = self
            .lists
            .iter_mut()
            .map(|list| &mut list.open_pos)
            .chain(self.items.iter_mut())
            .chain(self.paragraph.as_mut().map(|frame| &mut frame.start));
        for offset in offsets {
            if *offset > pos {
                *offset += s.len();
            }
        }
    }
}

/// Classes and key-value attributes from a heading's `{...}` block.
fn heading_attributes(
    classes: Vec<CowStr<'_>>,
    attrs: Vec<(CowStr<'_>, Option<CowStr<'_>>)>,
) -> Attributes {
    Attributes {
        id: None,
        classes: classes.into_iter().map(|class| class.to_string()).collect(),
        pairs: attrs
            .into_iter()
            .map(|(key, value)| {
                let value = value.map(|v| v.to_string()).unwrap_or_default();
                (key.to_string(), value)
            })
            .collect(),
    }
}
