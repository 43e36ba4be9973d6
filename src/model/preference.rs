//! Learning preferences captured at onboarding

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-reported starting skill level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Intermediate,
    Advanced,
    /// Also read for unrecognised tags
    #[default]
    #[serde(other)]
    Beginner,
}

impl SkillLevel {
    pub fn all() -> &'static [SkillLevel] {
        &[Self::Beginner, Self::Intermediate, Self::Advanced]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::all().iter().copied().find(|level| level.as_str() == s)
    }
}

/// Why the learner wants to study the topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningGoal {
    Job,
    Exam,
    SkillUpgrade,
    /// Also read for unrecognised tags
    #[default]
    #[serde(other)]
    PersonalInterest,
}

impl LearningGoal {
    pub fn all() -> &'static [LearningGoal] {
        &[Self::Job, Self::Exam, Self::SkillUpgrade, Self::PersonalInterest]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Job => "job",
            Self::Exam => "exam",
            Self::SkillUpgrade => "skill_upgrade",
            Self::PersonalInterest => "personal_interest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Job => "Job Preparation",
            Self::Exam => "Exam Prep",
            Self::SkillUpgrade => "Skill Upgrade",
            Self::PersonalInterest => "Personal Interest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace('-', "_");
        Self::all().iter().copied().find(|goal| goal.as_str() == s)
    }
}

/// Preferred learning medium
///
/// `Images` is never offered at onboarding but is accepted as a content filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredFormat {
    Videos,
    Text,
    Projects,
    Images,
    /// Also read for unrecognised tags
    #[default]
    #[serde(other)]
    Mixed,
}

impl PreferredFormat {
    /// Formats offered by the onboarding wizard
    pub fn onboarding_choices() -> &'static [PreferredFormat] {
        &[Self::Videos, Self::Text, Self::Projects, Self::Mixed]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Videos => "videos",
            Self::Text => "text",
            Self::Projects => "projects",
            Self::Images => "images",
            Self::Mixed => "mixed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Videos => "Videos",
            Self::Text => "Text",
            Self::Projects => "Projects",
            Self::Images => "Images",
            Self::Mixed => "Mixed",
        }
    }

    /// Parse a format tag; anything unrecognised falls back to mixed
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "videos" | "video" => Self::Videos,
            "text" => Self::Text,
            "projects" | "project" => Self::Projects,
            "images" | "image" => Self::Images,
            _ => Self::Mixed,
        }
    }
}

/// A stored preference row. Never updated after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub skill_level: SkillLevel,
    pub learning_goal: LearningGoal,
    pub preferred_format: PreferredFormat,
    pub hours_per_day: u32,
    pub days_per_week: u32,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the preferences table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPreference {
    pub user_id: Uuid,
    pub topic: String,
    pub skill_level: SkillLevel,
    pub learning_goal: LearningGoal,
    pub preferred_format: PreferredFormat,
    pub hours_per_day: u32,
    pub days_per_week: u32,
}
