//! In-memory table store for flow tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use super::{StoreError, TableStore};
use crate::model::{
    LearningPath, NewPreference, PathStatus, PathStep, Preference, StepResource, StepStatus,
    StepUpdate,
};

#[derive(Debug, Default)]
pub struct Tables {
    pub preferences: Vec<Preference>,
    pub paths: Vec<LearningPath>,
    pub steps: Vec<PathStep>,
    pub resources: Vec<StepResource>,
}

/// Store backed by vectors, with switches to inject write failures
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    pub fail_preference_insert: AtomicBool,
    pub fail_progress_writes: AtomicBool,
    pub progress_writes: AtomicUsize,
    pub step_writes: AtomicUsize,
}

impl MemoryStore {
    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    /// Seed a path with one step per status, returning the path id and step ids
    pub fn seed_path(&self, statuses: &[StepStatus]) -> (Uuid, Vec<Uuid>) {
        self.seed_path_with_preference(statuses, None)
    }

    pub fn seed_path_with_preference(
        &self,
        statuses: &[StepStatus],
        preference_id: Option<Uuid>,
    ) -> (Uuid, Vec<Uuid>) {
        let path_id = Uuid::new_v4();
        let mut tables = self.tables();
        tables.paths.push(LearningPath {
            id: path_id,
            user_id: Uuid::nil(),
            preference_id,
            title: "Learning Rust".into(),
            description: Some("From zero to async".into()),
            topic: "Rust".into(),
            status: PathStatus::Active,
            progress_percentage: 0,
            estimated_hours: Some(20.0),
            created_at: Utc::now(),
            updated_at: None,
        });
        let mut ids = Vec::new();
        for (i, status) in statuses.iter().enumerate() {
            let id = Uuid::new_v4();
            tables.steps.push(PathStep {
                id,
                path_id,
                step_order: i as i32 + 1,
                title: format!("Step {}", i + 1),
                description: None,
                difficulty: "beginner".into(),
                estimated_minutes: 30,
                status: *status,
                completed_at: None,
            });
            ids.push(id);
        }
        (path_id, ids)
    }

    pub fn add_resource(&self, resource: StepResource) {
        self.tables().resources.push(resource);
    }

    pub fn path(&self, id: Uuid) -> LearningPath {
        self.tables().paths.iter().find(|p| p.id == id).cloned().unwrap()
    }

    pub fn step(&self, id: Uuid) -> PathStep {
        self.tables().steps.iter().find(|s| s.id == id).cloned().unwrap()
    }
}

impl TableStore for MemoryStore {
    async fn insert_preference(
        &self,
        preference: &NewPreference,
    ) -> Result<Preference, StoreError> {
        if self.fail_preference_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Api { status: 400, message: "insert rejected".into() });
        }
        let row = Preference {
            id: Uuid::new_v4(),
            user_id: preference.user_id,
            topic: preference.topic.clone(),
            skill_level: preference.skill_level,
            learning_goal: preference.learning_goal,
            preferred_format: preference.preferred_format,
            hours_per_day: preference.hours_per_day,
            days_per_week: preference.days_per_week,
            created_at: Utc::now(),
        };
        self.tables().preferences.push(row.clone());
        Ok(row)
    }

    async fn get_preference(&self, id: Uuid) -> Result<Option<Preference>, StoreError> {
        Ok(self.tables().preferences.iter().find(|p| p.id == id).cloned())
    }

    async fn list_paths(&self) -> Result<Vec<LearningPath>, StoreError> {
        let mut paths = self.tables().paths.clone();
        paths.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paths)
    }

    async fn get_path(&self, id: Uuid) -> Result<Option<LearningPath>, StoreError> {
        Ok(self.tables().paths.iter().find(|p| p.id == id).cloned())
    }

    async fn update_path_progress(&self, id: Uuid, progress: u8) -> Result<(), StoreError> {
        if self.fail_progress_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Network("connection reset".into()));
        }
        self.progress_writes.fetch_add(1, Ordering::SeqCst);
        if let Some(path) = self.tables().paths.iter_mut().find(|p| p.id == id) {
            path.progress_percentage = progress;
        }
        Ok(())
    }

    async fn list_steps(&self, path_id: Uuid) -> Result<Vec<PathStep>, StoreError> {
        let mut steps: Vec<PathStep> =
            self.tables().steps.iter().filter(|s| s.path_id == path_id).cloned().collect();
        steps.sort_by_key(|s| s.step_order);
        Ok(steps)
    }

    async fn get_step(&self, id: Uuid) -> Result<Option<PathStep>, StoreError> {
        Ok(self.tables().steps.iter().find(|s| s.id == id).cloned())
    }

    async fn update_step(&self, id: Uuid, update: &StepUpdate) -> Result<(), StoreError> {
        self.step_writes.fetch_add(1, Ordering::SeqCst);
        if let Some(step) = self.tables().steps.iter_mut().find(|s| s.id == id) {
            step.status = update.status;
            step.completed_at = update.completed_at;
        }
        Ok(())
    }

    async fn list_resources(&self, step_id: Uuid) -> Result<Vec<StepResource>, StoreError> {
        Ok(self.tables().resources.iter().filter(|r| r.step_id == step_id).cloned().collect())
    }

    async fn list_resources_for_steps(
        &self,
        step_ids: &[Uuid],
    ) -> Result<Vec<StepResource>, StoreError> {
        Ok(self
            .tables()
            .resources
            .iter()
            .filter(|r| step_ids.contains(&r.step_id))
            .cloned()
            .collect())
    }
}
