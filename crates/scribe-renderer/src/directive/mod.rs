//! Container directives: `:::name info {attrs}` ... `:::`.
//!
//! Container lines are rewritten to HTML before the markdown parser sees the
//! document. Each directive line becomes a standalone HTML block surrounded by
//! blank lines, so the content between the opening and closing lines is still
//! parsed as markdown.
//!
//! # Example
//!
//! ```
//! use scribe_renderer::directive::{ContainerDirective, DirectiveArgs, DirectiveOutput, DirectiveProcessor};
//!
//! struct Aside;
//!
//! impl ContainerDirective for Aside {
//!     fn name(&self) -> &str { "aside" }
//!
//!     fn start(&mut self, args: DirectiveArgs, _line: usize) -> DirectiveOutput {
//!         DirectiveOutput::html(format!("<aside title=\"{}\">\n", args.content))
//!     }
//!
//!     fn end(&mut self, _line: usize) -> Option<String> {
//!         Some("\n</aside>\n".to_owned())
//!     }
//! }
//!
//! let mut processor = DirectiveProcessor::new().with_container(Aside);
//! let output = processor.process(":::aside Related\nSee also.\n:::");
//! assert!(output.contains("<aside title=\"Related\">"));
//! assert!(output.contains("</aside>"));
//! ```

mod args;
mod container;
mod output;
mod parser;
mod processor;

pub use args::DirectiveArgs;
pub use container::ContainerDirective;
pub use output::DirectiveOutput;
pub use processor::DirectiveProcessor;
