//! Plain-text rendering for the terminal
//!
//! Every renderer builds a list of lines and returns them joined, so output
//! can be printed or compared in tests as is.

pub mod chat;
pub mod dashboard;
pub mod step;
pub mod timeline;

use textwrap::{Options, wrap};

use crate::app::{FlowError, Notice, NoticeKind};
use crate::model::StepStatus;

/// Status indicators for steps
const STATUS_NOT_STARTED: &str = "○";
const STATUS_IN_PROGRESS: &str = "●";
const STATUS_COMPLETED: &str = "✓";
const STATUS_UNKNOWN: &str = "?";

/// Width of the progress bar in cells
const BAR_WIDTH: usize = 20;

/// Narrowest width text is wrapped to
const MIN_WIDTH: usize = 20;

pub fn status_glyph(status: StepStatus) -> &'static str {
    match status {
        StepStatus::NotStarted => STATUS_NOT_STARTED,
        StepStatus::InProgress => STATUS_IN_PROGRESS,
        StepStatus::Completed => STATUS_COMPLETED,
        StepStatus::Unknown => STATUS_UNKNOWN,
    }
}

pub fn status_label(status: StepStatus) -> &'static str {
    match status {
        StepStatus::NotStarted => "Not started",
        StepStatus::InProgress => "In progress",
        StepStatus::Completed => "Completed",
        StepStatus::Unknown => "Unknown status",
    }
}

/// `[#####---------------]  25%`
pub fn progress_bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = BAR_WIDTH * percent as usize / 100;
    format!("[{}{}] {:>3}%", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled), percent)
}

/// Wrap `text` to `width`, prefixing every line with `indent`
pub(crate) fn wrapped(text: &str, width: usize, indent: &str) -> Vec<String> {
    let width = width.max(MIN_WIDTH);
    let opts = Options::new(width).initial_indent(indent).subsequent_indent(indent);
    wrap(text, opts).into_iter().map(|s| s.to_string()).collect()
}

pub fn notice(notice: &Notice) -> String {
    let marker = match notice.kind {
        NoticeKind::Info => "✓",
        NoticeKind::Error => "✗",
    };
    match &notice.description {
        Some(description) => format!("{} {}: {}", marker, notice.title, description),
        None => format!("{} {}", marker, notice.title),
    }
}

/// One-line message for a failed flow, with a hint when one helps
pub fn error(error: &FlowError) -> String {
    if error.requires_reauth() {
        format!("✗ {}\n  Sign in with `pathwise login --token <token> --user-id <id>`", error)
    } else if error.is_recoverable() {
        format!("✗ {}\n  Try again in a moment.", error)
    } else {
        format!("✗ {}", error)
    }
}
