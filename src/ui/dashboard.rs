//! Dashboard listing

use super::progress_bar;
use crate::app::dashboard::Dashboard;
use crate::model::LearningPath;

/// Render the dashboard
pub fn render(dashboard: &Dashboard) -> String {
    if dashboard.is_empty() {
        return "No learning paths yet\n\nCreate one with:\npathwise onboard".to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "{} paths · {} active · {} completed",
        dashboard.total(),
        dashboard.active.len(),
        dashboard.completed.len()
    ));

    if !dashboard.active.is_empty() {
        lines.push(String::new());
        lines.push(format!("Active ({})", dashboard.active.len()));
        lines.extend(dashboard.active.iter().flat_map(path_entry));
    }

    if !dashboard.completed.is_empty() {
        lines.push(String::new());
        lines.push(format!("Completed ({})", dashboard.completed.len()));
        lines.extend(dashboard.completed.iter().flat_map(path_entry));
    }

    lines.join("\n")
}

fn path_entry(path: &LearningPath) -> [String; 2] {
    [
        format!("  {}  {}", path.title, path.id),
        format!(
            "    {}  {} · {}",
            progress_bar(path.progress_percentage),
            path.topic,
            path.estimate_label()
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PathStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn path(title: &str, status: PathStatus, progress: u8) -> LearningPath {
        LearningPath {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            preference_id: None,
            title: title.into(),
            description: None,
            topic: "Rust".into(),
            status,
            progress_percentage: progress,
            estimated_hours: Some(12.0),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn empty_dashboard_points_to_onboarding() {
        assert!(render(&Dashboard::default()).contains("pathwise onboard"));
    }

    #[test]
    fn lists_both_groups_with_counts() {
        let dashboard = Dashboard::from_paths(vec![
            path("Async Rust", PathStatus::Active, 40),
            path("Rust Basics", PathStatus::Completed, 100),
        ]);

        let text = render(&dashboard);

        assert!(text.starts_with("2 paths · 1 active · 1 completed"));
        assert!(text.contains("Active (1)"));
        assert!(text.contains("Completed (1)"));
        assert!(text.contains("~12h total"));
        assert!(text.find("Async Rust") < text.find("Rust Basics"));
    }
}
