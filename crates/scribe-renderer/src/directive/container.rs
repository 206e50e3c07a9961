//! Container directive trait.

use super::{DirectiveArgs, DirectiveOutput};

/// Handler for container directives: `:::name info` ... `:::`
///
/// Handlers implement `Send` only (not `Sync`) since each document gets its own
/// processor instance.
pub trait ContainerDirective: Send {
    /// Directive name matched against `:::name`.
    fn name(&self) -> &str;

    /// Handle the opening line.
    ///
    /// `args.content` holds the info text after the name. Returning
    /// [`DirectiveOutput::Skip`] keeps the line verbatim and does not open a
    /// container.
    fn start(&mut self, args: DirectiveArgs, line: usize) -> DirectiveOutput;

    /// Handle the closing `:::` of a container this handler opened.
    ///
    /// Returns closing HTML, or `None` to emit nothing.
    fn end(&mut self, line: usize) -> Option<String>;

    /// Warnings collected by the handler.
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }
}
