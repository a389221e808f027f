//! Terminal rendering of status lines.
//!
//! The in-flight (⏳) line lives in an indicatif bar so each update
//! overwrites the previous one; final lines are printed above it.

use indicatif::{ProgressBar, ProgressStyle};
use ollabench_core::{ProgressSink, StatusLine};

/// Renders status lines to stderr with fixed column widths.
pub struct TerminalProgress {
    bar: ProgressBar,
    label_width: usize,
    progress_width: usize,
}

impl TerminalProgress {
    pub fn new(label_width: usize, progress_width: usize) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        Self {
            bar,
            label_width,
            progress_width,
        }
    }

    /// Remove the in-flight line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn render(&self, line: &StatusLine) -> String {
        line.render(self.label_width, self.progress_width)
    }
}

impl ProgressSink for TerminalProgress {
    fn report(&mut self, line: StatusLine) {
        let text = self.render(&line);
        if !line.status.is_final() {
            self.bar.set_message(text);
            return;
        }

        self.bar.set_message("");
        if self.bar.is_hidden() {
            // Not a terminal: indicatif drops println, keep the log of final lines
            eprintln!("{text}");
        } else {
            self.bar.println(text);
        }
    }
}
