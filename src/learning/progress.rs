//! Path completion percentage

use uuid::Uuid;

use crate::model::{PathStep, StepStatus};

/// `round(100 * completed / total)` with halves rounded up
///
/// A zero total is clamped to one, giving 0%.
pub fn percentage(completed: usize, total: usize) -> u8 {
    let total = total.max(1);
    let completed = completed.min(total);
    ((200 * completed + total) / (2 * total)) as u8
}

/// Percentage for the steps as they currently stand
pub fn progress_of(steps: &[PathStep]) -> u8 {
    let completed = steps.iter().filter(|s| s.status.is_completed()).count();
    percentage(completed, steps.len())
}

/// Percentage after `target` moves to `new_status`, all other steps unchanged
pub fn progress_after(steps: &[PathStep], target: Uuid, new_status: StepStatus) -> u8 {
    let completed = steps
        .iter()
        .filter(|s| {
            if s.id == target { new_status.is_completed() } else { s.status.is_completed() }
        })
        .count();
    percentage(completed, steps.len())
}

/// Compare a stored percentage against the steps
///
/// Returns the corrected value when they disagree.
pub fn reconcile(stored: u8, steps: &[PathStep]) -> Option<u8> {
    let actual = progress_of(steps);
    (actual != stored).then_some(actual)
}
