//! Fenced code block tracking for line-level preprocessing.

/// Tracks whether a line sits inside a fenced code block.
///
/// A fence opens with three or more backticks or tildes. It closes on a line
/// made only of the same character, at least as long as the opener.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` if the line opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();

        match self.open {
            Some((ch, len)) => {
                let run = leading_run(trimmed, ch);
                if run >= len && trimmed[run..].trim().is_empty() {
                    self.open = None;
                    return true;
                }
                false
            }
            None => {
                let Some(first) = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))
                else {
                    return false;
                };
                let run = leading_run(trimmed, first);
                // Backtick fences cannot carry backticks in their info string
                if run < 3 || (first == '`' && trimmed[run..].contains('`')) {
                    return false;
                }
                self.open = Some((first, run));
                true
            }
        }
    }
}

/// Number of leading `ch` characters (all single-byte).
fn leading_run(s: &str, ch: char) -> usize {
    s.chars().take_while(|&c| c == ch).count()
}
