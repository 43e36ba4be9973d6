//! Step status lifecycle
//!
//! not_started -> in_progress -> completed, plus completed -> not_started
//! through Reset. Status writes are not guarded: any status may be written
//! over any other, and the last write wins.

use chrono::{DateTime, Utc};

use crate::model::{PathStep, StepStatus, StepUpdate};

/// User actions offered on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    /// Begin a fresh step; content is generated first when missing
    Start,
    /// Reopen a step already in progress
    Continue,
    /// Mark the step done
    Complete,
    /// Send a completed step back to not started
    Reset,
}

impl StepAction {
    /// Actions offered for a step in `status`, in display order
    pub fn available(status: StepStatus) -> &'static [StepAction] {
        match status {
            StepStatus::NotStarted => &[StepAction::Start],
            StepStatus::InProgress => &[StepAction::Continue, StepAction::Complete],
            StepStatus::Completed => &[StepAction::Reset],
            StepStatus::Unknown => &[],
        }
    }

    /// Status written by this action, `None` when it only navigates
    pub fn target_status(&self) -> Option<StepStatus> {
        match self {
            StepAction::Start => Some(StepStatus::InProgress),
            StepAction::Continue => None,
            StepAction::Complete => Some(StepStatus::Completed),
            StepAction::Reset => Some(StepStatus::NotStarted),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StepAction::Start => "Start",
            StepAction::Continue => "Continue",
            StepAction::Complete => "Complete",
            StepAction::Reset => "Reset",
        }
    }
}

/// Build the write for moving `step` to `new_status`
///
/// Entering completed stamps `completed_at` (keeping an existing stamp);
/// any other status clears it.
pub fn update_for(step: &PathStep, new_status: StepStatus, now: DateTime<Utc>) -> StepUpdate {
    let completed_at = match new_status {
        StepStatus::Completed => Some(step.completed_at.unwrap_or(now)),
        StepStatus::NotStarted | StepStatus::InProgress | StepStatus::Unknown => None,
    };
    StepUpdate { status: new_status, completed_at }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn step(status: StepStatus, completed_at: Option<DateTime<Utc>>) -> PathStep {
        PathStep {
            id: Uuid::new_v4(),
            path_id: Uuid::new_v4(),
            step_order: 1,
            title: "Variables".into(),
            description: None,
            difficulty: "beginner".into(),
            estimated_minutes: 20,
            status,
            completed_at,
        }
    }

    #[test]
    fn actions_per_status() {
        assert_eq!(StepAction::available(StepStatus::NotStarted), &[StepAction::Start]);
        assert_eq!(
            StepAction::available(StepStatus::InProgress),
            &[StepAction::Continue, StepAction::Complete]
        );
        assert_eq!(StepAction::available(StepStatus::Completed), &[StepAction::Reset]);
        assert!(StepAction::available(StepStatus::Unknown).is_empty());
    }

    #[test]
    fn continue_does_not_write() {
        assert_eq!(StepAction::Continue.target_status(), None);
        assert_eq!(StepAction::Reset.target_status(), Some(StepStatus::NotStarted));
    }

    #[test]
    fn completing_stamps_time() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let update = update_for(&step(StepStatus::InProgress, None), StepStatus::Completed, now);
        assert_eq!(update.completed_at, Some(now));
    }

    #[test]
    fn recompleting_keeps_original_stamp() {
        let first = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let update =
            update_for(&step(StepStatus::Completed, Some(first)), StepStatus::Completed, now);
        assert_eq!(update.completed_at, Some(first));
    }

    #[test]
    fn reset_clears_stamp() {
        let first = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        let update = update_for(
            &step(StepStatus::Completed, Some(first)),
            StepStatus::NotStarted,
            Utc::now(),
        );
        assert_eq!(update, StepUpdate { status: StepStatus::NotStarted, completed_at: None });
    }

    #[test]
    fn direct_completion_is_not_guarded() {
        let update =
            update_for(&step(StepStatus::NotStarted, None), StepStatus::Completed, Utc::now());
        assert_eq!(update.status, StepStatus::Completed);
    }
}
