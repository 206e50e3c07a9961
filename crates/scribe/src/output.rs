//! Colored terminal output.

use console::{Style, Term};
use scribe_state::{Toast, ToastKind};

/// Messages go to stderr; command results go to stdout via [`Output::print`].
pub(crate) struct Output {
    messages: Term,
    results: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            messages: Term::stderr(),
            results: Term::stdout(),
        }
    }

    /// Write a command result to stdout.
    pub(crate) fn print(&self, text: &str) -> std::io::Result<()> {
        self.results.write_line(text)
    }

    pub(crate) fn info(&self, msg: &str) {
        self.styled(&Style::new(), msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&Style::new().green(), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&Style::new().yellow(), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&Style::new().red(), msg);
    }

    pub(crate) fn highlight(&self, msg: &str) {
        self.styled(&Style::new().cyan().bold(), msg);
    }

    /// Print a toast in the color of its kind.
    pub(crate) fn toast(&self, toast: &Toast) {
        let style = match toast.kind {
            ToastKind::Success => Style::new().green(),
            ToastKind::Error => Style::new().red(),
            ToastKind::Warning => Style::new().yellow(),
            ToastKind::Info => Style::new(),
        };
        self.styled(&style, &toast.message);
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.messages.write_line(&style.apply_to(msg).to_string());
    }
}
