//! Dashboard: the user's paths split by status

use super::App;
use super::error::FlowError;
use crate::ai::LearningBackend;
use crate::model::{LearningPath, PathStatus};
use crate::store::TableStore;

/// Paths grouped for the dashboard, each group newest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub active: Vec<LearningPath>,
    pub completed: Vec<LearningPath>,
}

impl Dashboard {
    /// Split paths already ordered newest first
    ///
    /// Paths with an unrecognised status are left out of both groups.
    pub fn from_paths(paths: Vec<LearningPath>) -> Self {
        let mut dashboard = Self::default();
        for path in paths {
            match path.status {
                PathStatus::Active => dashboard.active.push(path),
                PathStatus::Completed => dashboard.completed.push(path),
                PathStatus::Unknown => {
                    tracing::debug!("Skipping path {} with unknown status", path.id)
                }
            }
        }
        dashboard
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.completed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.active.len() + self.completed.len()
    }
}

impl<S, B> App<S, B>
where
    S: TableStore,
    B: LearningBackend + 'static,
{
    pub async fn load_dashboard(&self) -> Result<Dashboard, FlowError> {
        let paths = self.store.list_paths().await?;
        tracing::debug!("Loaded {} paths", paths.len());
        Ok(Dashboard::from_paths(paths))
    }
}
