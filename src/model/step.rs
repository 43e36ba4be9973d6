//! Steps within a learning path

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current status of a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    /// Any tag this crate does not know; offers no actions
    #[serde(other)]
    Unknown,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A row from the path steps table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub id: Uuid,
    pub path_id: Uuid,
    /// Position within the path, unique and ascending
    pub step_order: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub difficulty: String,
    pub estimated_minutes: u32,
    pub status: StepStatus,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Update payload for a step status change
///
/// `completed_at` is always sent so that leaving `completed` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepUpdate {
    pub status: StepStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tags() {
        assert_eq!(serde_json::to_string(&StepStatus::NotStarted).unwrap(), "\"not_started\"");
        let status: StepStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, StepStatus::InProgress);
    }

    #[test]
    fn unknown_status_keeps_the_row() {
        let json = r#"{
            "id": "6f1c2a44-3b8e-4c55-9d3e-1a2b3c4d5e6f",
            "path_id": "0b6e3f7c-5d2a-4f1e-8c9b-7a6d5e4f3c2b",
            "step_order": 1,
            "title": "Optional reading",
            "difficulty": "beginner",
            "estimated_minutes": 10,
            "status": "skipped"
        }"#;
        let step: PathStep = serde_json::from_str(json).unwrap();
        assert_eq!(step.status, StepStatus::Unknown);
        assert!(!step.status.is_completed());
    }

    #[test]
    fn update_serializes_null_timestamp() {
        let update = StepUpdate { status: StepStatus::NotStarted, completed_at: None };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"status":"not_started","completed_at":null}"#);
    }

    #[test]
    fn step_row_deserializes() {
        let json = r#"{
            "id": "6f1c2a44-3b8e-4c55-9d3e-1a2b3c4d5e6f",
            "path_id": "0b6e3f7c-5d2a-4f1e-8c9b-7a6d5e4f3c2b",
            "step_order": 2,
            "title": "Ownership",
            "description": null,
            "difficulty": "intermediate",
            "estimated_minutes": 45,
            "status": "in_progress",
            "completed_at": null,
            "created_at": "2024-03-01T10:00:00+00:00"
        }"#;
        let step: PathStep = serde_json::from_str(json).unwrap();
        assert_eq!(step.step_order, 2);
        assert_eq!(step.status, StepStatus::InProgress);
    }
}
