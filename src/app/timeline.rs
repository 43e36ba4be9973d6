//! Path timeline: loading a path with its steps and acting on steps

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::App;
use super::error::FlowError;
use super::state::{Notice, Screen, Transition};
use crate::ai::LearningBackend;
use crate::learning::{StepAction, lifecycle, progress};
use crate::model::{LearningPath, PathStep, StepResource, StepStatus};
use crate::store::TableStore;

/// A step together with its resources and the actions it offers
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineStep {
    pub step: PathStep,
    pub resources: Vec<StepResource>,
}

impl TimelineStep {
    pub fn actions(&self) -> &'static [StepAction] {
        StepAction::available(self.step.status)
    }

    pub fn has_resources(&self) -> bool {
        !self.resources.is_empty()
    }
}

/// A path and its ordered steps
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub path: LearningPath,
    pub steps: Vec<TimelineStep>,
}

impl Timeline {
    pub fn step(&self, step_id: Uuid) -> Option<&TimelineStep> {
        self.steps.iter().find(|s| s.step.id == step_id)
    }

    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.step.status.is_completed()).count()
    }
}

impl<S, B> App<S, B>
where
    S: TableStore,
    B: LearningBackend + 'static,
{
    /// Load a path, its steps by `step_order` and their resources
    ///
    /// Stored progress is recomputed from the steps; drift is corrected in
    /// the returned path and written back on a best-effort basis.
    pub async fn load_timeline(&self, path_id: Uuid) -> Result<Timeline, FlowError> {
        let mut path = self.store.get_path(path_id).await?.ok_or(FlowError::NotFound("Path"))?;
        let steps = self.store.list_steps(path_id).await?;

        if let Some(actual) = progress::reconcile(path.progress_percentage, &steps) {
            tracing::info!(
                "Path {} stored progress {}% disagrees with steps ({}%), correcting",
                path_id,
                path.progress_percentage,
                actual
            );
            path.progress_percentage = actual;
            if let Err(e) = self.store.update_path_progress(path_id, actual).await {
                tracing::warn!("Could not write corrected progress for path {}: {}", path_id, e);
            }
        }

        let step_ids: Vec<Uuid> = steps.iter().map(|s| s.id).collect();
        let mut by_step: HashMap<Uuid, Vec<StepResource>> = HashMap::new();
        for resource in self.store.list_resources_for_steps(&step_ids).await? {
            by_step.entry(resource.step_id).or_default().push(resource);
        }

        let steps = steps
            .into_iter()
            .map(|step| {
                let resources = by_step.remove(&step.id).unwrap_or_default();
                TimelineStep { step, resources }
            })
            .collect();

        Ok(Timeline { path, steps })
    }

    /// Write a step status and the path progress that follows from it
    ///
    /// The two writes are independent. If the progress write fails the step
    /// keeps its new status and the stored progress stays stale until the
    /// next load reconciles it. Returns the computed progress.
    pub async fn set_step_status(
        &self,
        path_id: Uuid,
        step_id: Uuid,
        new_status: StepStatus,
    ) -> Result<u8, FlowError> {
        let steps = self.store.list_steps(path_id).await?;
        let step = steps.iter().find(|s| s.id == step_id).ok_or(FlowError::NotFound("Step"))?;

        let update = lifecycle::update_for(step, new_status, Utc::now());
        self.store.update_step(step_id, &update).await?;

        let progress = progress::progress_after(&steps, step_id, new_status);
        if let Err(e) = self.store.update_path_progress(path_id, progress).await {
            tracing::warn!(
                "Step {} is now {} but path {} progress write failed: {}",
                step_id,
                new_status.as_str(),
                path_id,
                e
            );
        }

        tracing::info!("Step {} set to {}, path at {}%", step_id, new_status.as_str(), progress);
        Ok(progress)
    }

    /// Run a timeline action on a step
    ///
    /// Start generates content first when the step has none, then marks
    /// the step in progress and opens it.
    pub async fn perform(
        &self,
        path_id: Uuid,
        step_id: Uuid,
        action: StepAction,
    ) -> Result<Transition, FlowError> {
        let step = self
            .store
            .get_step(step_id)
            .await?
            .filter(|s| s.path_id == path_id)
            .ok_or(FlowError::NotFound("Step"))?;

        if !StepAction::available(step.status).contains(&action) {
            return Err(FlowError::Invalid(format!(
                "{} is not available for a step that is {}",
                action.label(),
                step.status.as_str()
            )));
        }

        match action {
            StepAction::Start => {
                self.ensure_content(step_id).await?;
                self.set_step_status(path_id, step_id, StepStatus::InProgress).await?;
                Ok(Transition::to(Screen::Step { path_id, step_id }))
            }
            StepAction::Continue => Ok(Transition::to(Screen::Step { path_id, step_id })),
            StepAction::Complete => {
                let progress = self.set_step_status(path_id, step_id, StepStatus::Completed).await?;
                let notice = Notice::info("Step completed")
                    .with_description(format!("Path at {}%", progress));
                Ok(Transition::to(Screen::Path(path_id)).with_notice(notice))
            }
            StepAction::Reset => {
                self.set_step_status(path_id, step_id, StepStatus::NotStarted).await?;
                Ok(Transition::to(Screen::Path(path_id)))
            }
        }
    }
}
