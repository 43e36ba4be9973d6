//! Generated learning path header

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a path. Transitions are driven by the generator, not by this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStatus {
    #[default]
    Active,
    Completed,
    /// Any tag this crate does not know; listed neither as active nor completed
    #[serde(other)]
    Unknown,
}

/// A row from the learning paths table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub preference_id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub topic: String,
    pub status: PathStatus,
    /// Stored completion percentage, 0-100
    pub progress_percentage: u8,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LearningPath {
    /// Dashboard label for the time estimate
    pub fn estimate_label(&self) -> String {
        match self.estimated_hours {
            Some(hours) if hours > 0.0 => format!("~{}h total", hours),
            _ => "In progress".to_string(),
        }
    }
}
