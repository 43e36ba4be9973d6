//! Request and response bodies for the AI functions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{LearningGoal, Preference, PreferredFormat, SkillLevel};

/// Body for the path generation function
///
/// Hashable so identical generation requests can be recognised.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePathRequest {
    pub preference_id: Uuid,
    pub topic: String,
    pub skill_level: SkillLevel,
    pub learning_goal: LearningGoal,
    pub preferred_format: PreferredFormat,
    pub hours_per_day: u32,
    pub days_per_week: u32,
}

impl From<&Preference> for GeneratePathRequest {
    fn from(preference: &Preference) -> Self {
        Self {
            preference_id: preference.id,
            topic: preference.topic.clone(),
            skill_level: preference.skill_level,
            learning_goal: preference.learning_goal,
            preferred_format: preference.preferred_format,
            hours_per_day: preference.hours_per_day,
            days_per_week: preference.days_per_week,
        }
    }
}

/// Successful path generation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePathResponse {
    pub path_id: Uuid,
    pub steps_count: u32,
}

/// Body for the step content function
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStepContentRequest {
    pub step_id: Uuid,
}

/// Message role in the chat
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Body for the chat function: the full history plus optional path scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_id: Option<Uuid>,
}

/// Chat function response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_path_request_uses_camel_case() {
        let request = GeneratePathRequest {
            preference_id: Uuid::nil(),
            topic: "Rust".into(),
            skill_level: SkillLevel::Beginner,
            learning_goal: LearningGoal::SkillUpgrade,
            preferred_format: PreferredFormat::Mixed,
            hours_per_day: 1,
            days_per_week: 5,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["preferenceId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["skillLevel"], "beginner");
        assert_eq!(json["learningGoal"], "skill_upgrade");
        assert_eq!(json["hoursPerDay"], 1);
        assert_eq!(json["daysPerWeek"], 5);
    }

    #[test]
    fn generate_path_response_parses() {
        let response: GeneratePathResponse = serde_json::from_str(
            r#"{"pathId":"6f1c2a44-3b8e-4c55-9d3e-1a2b3c4d5e6f","stepsCount":8}"#,
        )
        .unwrap();
        assert_eq!(response.steps_count, 8);
    }

    #[test]
    fn chat_request_omits_missing_path() {
        let request = ChatRequest { messages: vec![ChatMessage::user("Hi")], path_id: None };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"messages":[{"role":"user","content":"Hi"}]}"#
        );
    }
}
