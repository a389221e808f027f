//! Status lines reported while the tools run.
//!
//! The orchestrators only describe what is happening; rendering (and
//! overwriting the in-flight line) is up to the [`ProgressSink`].

/// Message shown for models missing from the service.
pub const MODEL_NOT_INSTALLED: &str =
    "Model not installed, don't forget to add `:latest` to the model name";

/// State shown by the leading icon of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Work in flight; the next line replaces this one
    Working,
    Done,
    Warning,
    Skipped,
}

impl Status {
    pub fn icon(self) -> &'static str {
        match self {
            Status::Working => "⏳",
            Status::Done => "✅",
            Status::Warning => "⚠️",
            Status::Skipped => "🚫",
        }
    }

    /// Whether the line stays on screen once the next one arrives.
    pub fn is_final(self) -> bool {
        !matches!(self, Status::Working)
    }
}

/// One `icon | label | [progress |] message` line.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub status: Status,
    /// Model or image name
    pub label: String,
    /// Optional counter column such as "2/5 runs"
    pub progress: Option<String>,
    pub message: String,
}

impl StatusLine {
    pub fn new(status: Status, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            label: label.into(),
            progress: None,
            message: message.into(),
        }
    }

    pub fn with_progress(mut self, progress: impl Into<String>) -> Self {
        self.progress = Some(progress.into());
        self
    }

    /// Render with the label and progress columns padded to fixed widths.
    pub fn render(&self, label_width: usize, progress_width: usize) -> String {
        let mut out = format!(
            "{} | {:<width$} ",
            self.status.icon(),
            self.label,
            width = label_width
        );
        if let Some(progress) = &self.progress {
            out.push_str(&format!("| {:<width$} ", progress, width = progress_width));
        }
        out.push_str("| ");
        out.push_str(&self.message);
        out
    }
}

/// "k/N runs" counter used by the benchmark.
pub fn runs_progress(current: u32, total: u32) -> String {
    format!("{current}/{total} runs")
}

/// Width of the runs column, sized for its widest value.
pub fn runs_progress_width(total: u32) -> usize {
    runs_progress(total, total).len()
}

/// Receives status lines as the tools progress.
pub trait ProgressSink {
    fn report(&mut self, line: StatusLine);
}

/// Discards every line.
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn report(&mut self, _line: StatusLine) {}
}

/// Keeps every reported line for assertions.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub lines: Vec<StatusLine>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn finals(&self) -> Vec<&StatusLine> {
        self.lines.iter().filter(|l| l.status.is_final()).collect()
    }
}

#[cfg(test)]
impl ProgressSink for RecordingSink {
    fn report(&mut self, line: StatusLine) {
        self.lines.push(line);
    }
}
