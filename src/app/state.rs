//! Navigation outcomes of the application flows

use uuid::Uuid;

/// Which screen a flow leaves the user on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Preference form. Carries the id of a preference saved before
    /// generation failed, which is left behind unused.
    Onboarding { orphaned_preference: Option<Uuid> },
    Dashboard,
    /// Timeline of one path
    Path(Uuid),
    /// Step viewer
    Step { path_id: Uuid, step_id: Uuid },
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A short message shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, title: title.into(), description: None }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, title: title.into(), description: None }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Where an action led, and what to tell the user about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub screen: Screen,
    pub notice: Option<Notice>,
}

impl Transition {
    pub fn to(screen: Screen) -> Self {
        Self { screen, notice: None }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Chat panel visibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    pub fn toggled(self) -> Self {
        match self {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_toggles() {
        assert_eq!(PanelState::default().toggled(), PanelState::Open);
        assert_eq!(PanelState::Open.toggled(), PanelState::Closed);
    }

    #[test]
    fn transition_builder() {
        let transition = Transition::to(Screen::Dashboard)
            .with_notice(Notice::error("Generation failed").with_description("timeout"));
        assert!(transition.notice.as_ref().unwrap().is_error());
        assert_eq!(transition.screen, Screen::Dashboard);
    }
}
