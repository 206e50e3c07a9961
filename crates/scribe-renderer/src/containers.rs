//! Built-in custom containers: tip, warning, danger, note, details and code groups.

use crate::attrs::Attributes;
use crate::directive::{ContainerDirective, DirectiveArgs, DirectiveOutput};
use crate::state::escape_html;

/// The closed set of container kinds the renderer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Tip,
    Warning,
    Danger,
    Note,
    Details,
    CodeGroup,
    CodeGroupItem,
}

/// How the info text of a container is rendered.
enum Title {
    /// `<p class="custom-container-title">` with a default.
    Paragraph(&'static str),
    /// `<summary class="custom-container-title">` with a default.
    Summary(&'static str),
    /// No title element.
    None,
    /// Info text in a `data-title` attribute.
    DataTitle,
}

/// Per-kind rendering parameters.
struct KindMeta {
    name: &'static str,
    tag: &'static str,
    classes: &'static [&'static str],
    title: Title,
}

impl ContainerKind {
    /// Every kind, in registration order.
    pub const ALL: [Self; 7] = [
        Self::Tip,
        Self::Warning,
        Self::Danger,
        Self::Note,
        Self::Details,
        Self::CodeGroup,
        Self::CodeGroupItem,
    ];

    const fn meta(self) -> KindMeta {
        match self {
            Self::Tip => KindMeta {
                name: "tip",
                tag: "div",
                classes: &["custom-container", "tip"],
                title: Title::Paragraph("TIP"),
            },
            Self::Warning => KindMeta {
                name: "warning",
                tag: "div",
                classes: &["custom-container", "warning"],
                title: Title::Paragraph("WARNING"),
            },
            Self::Danger => KindMeta {
                name: "danger",
                tag: "div",
                classes: &["custom-container", "danger"],
                title: Title::Paragraph("DANGER"),
            },
            Self::Note => KindMeta {
                name: "note",
                tag: "div",
                classes: &["custom-container", "note"],
                title: Title::Paragraph("NOTE"),
            },
            Self::Details => KindMeta {
                name: "details",
                tag: "details",
                classes: &["custom-container", "details"],
                title: Title::Summary("Details"),
            },
            Self::CodeGroup => KindMeta {
                name: "code-group",
                tag: "div",
                classes: &["code-group"],
                title: Title::None,
            },
            Self::CodeGroupItem => KindMeta {
                name: "code-group-item",
                tag: "div",
                classes: &["code-group-item"],
                title: Title::DataTitle,
            },
        }
    }

    /// Name used after `:::`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.meta().name
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Title used when the opening line carries no info text.
    #[must_use]
    pub const fn default_title(self) -> Option<&'static str> {
        match self.meta().title {
            Title::Paragraph(title) | Title::Summary(title) => Some(title),
            Title::None | Title::DataTitle => None,
        }
    }

    /// Opening HTML for a container with the given info text.
    pub(crate) fn open_html(self, info: &str, attrs: &Attributes) -> String {
        let meta = self.meta();
        let mut html = format!("<{}", meta.tag);
        attrs.write_to(&mut html, meta.classes);

        let title = if info.is_empty() {
            self.default_title().unwrap_or_default()
        } else {
            info
        };

        match meta.title {
            Title::Paragraph(_) => {
                html.push_str(r#"><p class="custom-container-title">"#);
                html.push_str(&escape_html(title));
                html.push_str("</p>");
            }
            Title::Summary(_) => {
                html.push_str(r#"><summary class="custom-container-title">"#);
                html.push_str(&escape_html(title));
                html.push_str("</summary>");
            }
            Title::None => html.push('>'),
            Title::DataTitle => {
                html.push_str(r#" data-title=""#);
                html.push_str(&escape_html(info));
                html.push_str(r#"">"#);
            }
        }
        html
    }

    pub(crate) fn close_html(self) -> String {
        format!("</{}>", self.meta().tag)
    }
}

/// Directive handler rendering one [`ContainerKind`].
pub(crate) struct CustomContainer {
    kind: ContainerKind,
}

impl CustomContainer {
    pub(crate) fn new(kind: ContainerKind) -> Self {
        Self { kind }
    }
}

impl ContainerDirective for CustomContainer {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn start(&mut self, mut args: DirectiveArgs, _line: usize) -> DirectiveOutput {
        let info = std::mem::take(&mut args.content);
        let attrs = Attributes::from_args(args);
        // Trailing newline leaves a blank line so the body parses as markdown
        DirectiveOutput::html(format!("{}\n", self.kind.open_html(&info, &attrs)))
    }

    fn end(&mut self, _line: usize) -> Option<String> {
        Some(format!("\n{}\n", self.kind.close_html()))
    }
}
