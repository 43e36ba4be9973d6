//! Hosted table store access
//!
//! The store owns four tables (preferences, paths, steps, resources) and
//! scopes every row to the signed-in user itself. Nothing here is
//! transactional: each call is one independent request.

pub mod error;
#[cfg(test)]
pub mod memory;
pub mod query;
pub mod rest;

use std::future::Future;

use uuid::Uuid;

use crate::model::{
    LearningPath, NewPreference, PathStep, Preference, StepResource, StepUpdate,
};

pub use error::StoreError;
pub use query::{Order, Query};
pub use rest::RestStore;

/// Table names in the hosted store
pub mod tables {
    pub const PREFERENCES: &str = "learning_preferences";
    pub const PATHS: &str = "learning_paths";
    pub const STEPS: &str = "path_steps";
    pub const RESOURCES: &str = "step_resources";
}

/// Row operations the application needs from the store
pub trait TableStore: Send + Sync {
    /// Insert a preference and return the stored row
    fn insert_preference(
        &self,
        preference: &NewPreference,
    ) -> impl Future<Output = Result<Preference, StoreError>> + Send;

    fn get_preference(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Preference>, StoreError>> + Send;

    /// All paths visible to the user, newest first
    fn list_paths(&self) -> impl Future<Output = Result<Vec<LearningPath>, StoreError>> + Send;

    fn get_path(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<LearningPath>, StoreError>> + Send;

    fn update_path_progress(
        &self,
        id: Uuid,
        progress: u8,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Steps of a path ordered by `step_order`
    fn list_steps(
        &self,
        path_id: Uuid,
    ) -> impl Future<Output = Result<Vec<PathStep>, StoreError>> + Send;

    fn get_step(&self, id: Uuid)
    -> impl Future<Output = Result<Option<PathStep>, StoreError>> + Send;

    fn update_step(
        &self,
        id: Uuid,
        update: &StepUpdate,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn list_resources(
        &self,
        step_id: Uuid,
    ) -> impl Future<Output = Result<Vec<StepResource>, StoreError>> + Send;

    /// Resources for several steps at once, in store order
    fn list_resources_for_steps(
        &self,
        step_ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<StepResource>, StoreError>> + Send;
}
