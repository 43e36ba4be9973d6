//! Path timeline

use super::{progress_bar, status_glyph, wrapped};
use crate::app::timeline::{Timeline, TimelineStep};

/// Render a path and its steps
pub fn render(timeline: &Timeline, width: usize) -> String {
    let path = &timeline.path;
    let mut lines: Vec<String> = Vec::new();

    lines.push(path.title.clone());
    if let Some(description) = &path.description {
        lines.extend(wrapped(description, width, ""));
    }
    lines.push(format!(
        "{}  {} of {} steps",
        progress_bar(path.progress_percentage),
        timeline.completed_count(),
        timeline.steps.len()
    ));
    lines.push(String::new());

    if timeline.steps.is_empty() {
        lines.push("This path has no steps".to_string());
    }

    for entry in &timeline.steps {
        lines.extend(step_entry(entry, width));
    }

    lines.join("\n")
}

fn step_entry(entry: &TimelineStep, width: usize) -> Vec<String> {
    let step = &entry.step;
    let mut lines = vec![format!(
        "{} {}. {}  ({}, {} min)",
        status_glyph(step.status),
        step.step_order,
        step.title,
        step.difficulty,
        step.estimated_minutes
    )];
    if let Some(description) = &step.description {
        lines.extend(wrapped(description, width, "     "));
    }

    let actions: Vec<&str> = entry.actions().iter().map(|a| a.label()).collect();
    let content = if entry.has_resources() {
        format!("{} resources", entry.resources.len())
    } else {
        "content not generated".to_string()
    };
    lines.push(format!("     [{}] · {} · {}", actions.join(" | "), content, step.id));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LearningPath, PathStatus, PathStep, StepStatus};
    use chrono::Utc;
    use uuid::Uuid;

    fn timeline(statuses: &[StepStatus]) -> Timeline {
        let path_id = Uuid::new_v4();
        let steps = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| TimelineStep {
                step: PathStep {
                    id: Uuid::new_v4(),
                    path_id,
                    step_order: i as i32 + 1,
                    title: format!("Step {}", i + 1),
                    description: Some("Read the chapter and try the exercises".into()),
                    difficulty: "beginner".into(),
                    estimated_minutes: 45,
                    status: *status,
                    completed_at: None,
                },
                resources: Vec::new(),
            })
            .collect();
        Timeline {
            path: LearningPath {
                id: path_id,
                user_id: Uuid::new_v4(),
                preference_id: None,
                title: "Learning Rust".into(),
                description: None,
                topic: "Rust".into(),
                status: PathStatus::Active,
                progress_percentage: 33,
                estimated_hours: None,
                created_at: Utc::now(),
                updated_at: None,
            },
            steps,
        }
    }

    #[test]
    fn shows_progress_and_actions_per_status() {
        let text = render(
            &timeline(&[StepStatus::Completed, StepStatus::InProgress, StepStatus::NotStarted]),
            80,
        );

        assert!(text.contains(" 33%  1 of 3 steps"));
        assert!(text.contains("✓ 1. Step 1"));
        assert!(text.contains("[Reset]"));
        assert!(text.contains("● 2. Step 2"));
        assert!(text.contains("[Continue | Complete]"));
        assert!(text.contains("○ 3. Step 3"));
        assert!(text.contains("[Start] · content not generated"));
    }

    #[test]
    fn empty_path() {
        assert!(render(&timeline(&[]), 80).contains("This path has no steps"));
    }
}
