//! Line-level preprocessing of container directives.

use crate::fence::FenceTracker;

use super::parser::{ContainerLine, parse_container_line};
use super::{ContainerDirective, DirectiveOutput};

/// An open container on the nesting stack.
struct ActiveContainer {
    /// Registered handler index, `None` for unknown names kept verbatim.
    handler: Option<usize>,
    name: String,
    colon_count: usize,
    line: usize,
    /// Leading whitespace of the opening line, reused for the closing HTML.
    indent: String,
}

/// Rewrites container directive lines to HTML before markdown parsing.
///
/// Lines inside fenced code blocks are left alone. Unknown container names
/// and their closing markers pass through unchanged.
pub struct DirectiveProcessor {
    handlers: Vec<Box<dyn ContainerDirective>>,
    fence: FenceTracker,
    active: Vec<ActiveContainer>,
    warnings: Vec<String>,
}

impl Default for DirectiveProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveProcessor {
    /// Create a processor with no registered containers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            fence: FenceTracker::new(),
            active: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Register a container directive handler.
    #[must_use]
    pub fn with_container<D: ContainerDirective + 'static>(mut self, handler: D) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Rewrite container lines in `input`.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let lines: Vec<&str> = input.lines().collect();
        let line_count = lines.len();

        for (idx, line) in lines.iter().enumerate() {
            let processed = self.process_line(line, idx + 1);
            output.push_str(&processed);

            // Preserve line endings
            if idx < line_count - 1 || input.ends_with('\n') {
                output.push('\n');
            }
        }

        self.finalize(&mut output, line_count);

        output
    }

    /// Warnings from the processor and every handler.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = self.warnings.clone();
        for handler in &self.handlers {
            warnings.extend(handler.warnings());
        }
        warnings
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> String {
        self.fence.update(line);

        if self.fence.in_fence() {
            return line.to_owned();
        }

        match parse_container_line(line) {
            Some(ContainerLine::Start {
                name,
                args,
                colon_count,
            }) => {
                let indent = leading_whitespace(line).to_owned();
                let handler = self.handlers.iter().position(|h| h.name() == name);
                let output = match handler {
                    Some(idx) => self.handlers[idx].start(args, line_num),
                    None => DirectiveOutput::Skip,
                };

                match output {
                    DirectiveOutput::Html(html) => {
                        let html = indent_lines(&html, &indent);
                        self.active.push(ActiveContainer {
                            handler,
                            name,
                            colon_count,
                            line: line_num,
                            indent,
                        });
                        html
                    }
                    DirectiveOutput::Skip => {
                        self.active.push(ActiveContainer {
                            handler: None,
                            name,
                            colon_count,
                            line: line_num,
                            indent,
                        });
                        line.to_owned()
                    }
                }
            }
            Some(ContainerLine::End { colon_count }) => self.close(line, line_num, colon_count),
            None => line.to_owned(),
        }
    }

    fn close(&mut self, line: &str, line_num: usize, colon_count: usize) -> String {
        let Some(top) = self.active.last() else {
            self.warnings.push(format!(
                "line {line_num}: stray ::: with no opening container"
            ));
            return line.to_owned();
        };

        // A shorter marker cannot close the current container
        if colon_count < top.colon_count {
            return line.to_owned();
        }

        match self.active.pop() {
            Some(ActiveContainer {
                handler: Some(idx),
                indent,
                ..
            }) => {
                let html = self.handlers[idx].end(line_num).unwrap_or_default();
                indent_lines(&html, &indent)
            }
            _ => line.to_owned(),
        }
    }

    /// Close containers still open at the end of the document, innermost first.
    fn finalize(&mut self, output: &mut String, last_line: usize) {
        for container in &self.active {
            if container.handler.is_some() {
                self.warnings.push(format!(
                    "line {}: unclosed container :::{} (missing closing :::)",
                    container.line, container.name
                ));
            }
        }

        while let Some(container) = self.active.pop() {
            let Some(idx) = container.handler else {
                continue;
            };
            let Some(html) = self.handlers[idx].end(last_line) else {
                continue;
            };
            if !output.is_empty() && !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&indent_lines(&html, &container.indent));
        }
        self.fence = FenceTracker::new();
    }
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Prefix every non-empty line of `html` with `indent`.
fn indent_lines(html: &str, indent: &str) -> String {
    if indent.is_empty() {
        return html.to_owned();
    }
    html.split('\n')
        .map(|part| {
            if part.is_empty() {
                String::new()
            } else {
                format!("{indent}{part}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
