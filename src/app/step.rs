//! Step viewer: lazy content generation and completion

use uuid::Uuid;

use super::App;
use super::error::FlowError;
use super::state::{Notice, Screen, Transition};
use crate::ai::LearningBackend;
use crate::learning::{self, FormatFilter, RenderedResource};
use crate::model::{PathStep, StepResource, StepStatus};
use crate::store::TableStore;

/// A step as shown in the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub step: PathStep,
    pub resources: Vec<StepResource>,
    pub filter: FormatFilter,
    /// Content was generated while opening the step
    pub generated: bool,
}

impl StepView {
    /// Resources passing the filter, converted for display
    pub fn rendered(&self) -> Vec<RenderedResource<'_>> {
        learning::dispatch(&self.resources, self.filter)
    }

    pub fn can_mark_done(&self) -> bool {
        matches!(self.step.status, StepStatus::NotStarted | StepStatus::InProgress)
    }
}

impl<S, B> App<S, B>
where
    S: TableStore,
    B: LearningBackend + 'static,
{
    /// Generate content for a step that has none
    ///
    /// Returns whether the backend was asked. Concurrent callers for the same
    /// step share one request.
    pub async fn ensure_content(&self, step_id: Uuid) -> Result<bool, FlowError> {
        if !self.store.list_resources(step_id).await?.is_empty() {
            return Ok(false);
        }
        self.require_user()?;
        tracing::info!("Step {} has no resources, generating content", step_id);
        self.generator.generate_step_content(step_id).await?;
        Ok(true)
    }

    /// Open a step, generating its content first when it has none
    ///
    /// Resources are filtered by `filter`, or otherwise by the preferred
    /// format of the preference the path was generated from.
    pub async fn open_step(
        &self,
        path_id: Uuid,
        step_id: Uuid,
        filter: Option<FormatFilter>,
    ) -> Result<StepView, FlowError> {
        let step = self
            .store
            .get_step(step_id)
            .await?
            .filter(|s| s.path_id == path_id)
            .ok_or(FlowError::NotFound("Step"))?;

        let generated = self.ensure_content(step_id).await?;
        let resources = self.store.list_resources(step_id).await?;

        let filter = match filter {
            Some(filter) => filter,
            None => self.path_format(path_id).await?,
        };

        Ok(StepView { step, resources, filter, generated })
    }

    /// Mark a step completed and return to its path
    pub async fn mark_done(&self, path_id: Uuid, step_id: Uuid) -> Result<Transition, FlowError> {
        let progress = self.set_step_status(path_id, step_id, StepStatus::Completed).await?;
        let notice =
            Notice::info("Step completed").with_description(format!("Path at {}%", progress));
        Ok(Transition::to(Screen::Path(path_id)).with_notice(notice))
    }

    async fn path_format(&self, path_id: Uuid) -> Result<FormatFilter, FlowError> {
        let Some(path) = self.store.get_path(path_id).await? else {
            return Ok(FormatFilter::default());
        };
        let Some(preference_id) = path.preference_id else {
            return Ok(FormatFilter::default());
        };
        let preference = self.store.get_preference(preference_id).await?;
        Ok(FormatFilter::from(preference.map(|p| p.preferred_format)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiError;
    use crate::app::test_support::{app, signed_out_app};
    use crate::model::{LearningGoal, NewPreference, PreferredFormat, ResourceType, SkillLevel};
    use crate::store::memory::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    use StepStatus::*;

    fn resource(step_id: Uuid, resource_type: ResourceType, title: &str) -> StepResource {
        StepResource {
            id: Uuid::new_v4(),
            step_id,
            title: title.into(),
            url: "https://example.com".into(),
            resource_type,
        }
    }

    async fn store_with_format(format: PreferredFormat) -> (MemoryStore, Uuid, Vec<Uuid>) {
        let store = MemoryStore::default();
        let preference = store
            .insert_preference(&NewPreference {
                user_id: Uuid::new_v4(),
                topic: "Rust".into(),
                skill_level: SkillLevel::Beginner,
                learning_goal: LearningGoal::Job,
                preferred_format: format,
                hours_per_day: 1,
                days_per_week: 5,
            })
            .await
            .unwrap();
        let (path_id, ids) =
            store.seed_path_with_preference(&[InProgress, NotStarted], Some(preference.id));
        (store, path_id, ids)
    }

    #[tokio::test]
    async fn open_generates_content_once() {
        let store = MemoryStore::default();
        let (path_id, ids) = store.seed_path(&[NotStarted]);
        let (app, _, backend) = app(store);

        let first = app.open_step(path_id, ids[0], None).await.unwrap();
        let second = app.open_step(path_id, ids[0], None).await.unwrap();

        assert!(first.generated);
        assert!(!second.generated);
        assert_eq!(backend.content_calls(), 1);
        assert_eq!(first.resources.len(), 2);
        assert_eq!(first.step.status, NotStarted);
    }

    #[tokio::test]
    async fn concurrent_opens_share_generation() {
        let store = MemoryStore::default();
        let (path_id, ids) = store.seed_path(&[NotStarted]);
        let store = Arc::new(store);
        let backend = Arc::new(
            crate::ai::scripted::ScriptedBackend::with_store(Arc::clone(&store))
                .with_delay(std::time::Duration::from_millis(20)),
        );
        let app = App::new(
            Arc::clone(&store),
            Arc::clone(&backend),
            Some(Uuid::new_v4()),
            std::time::Duration::ZERO,
        );

        let (a, b) = tokio::join!(
            app.open_step(path_id, ids[0], None),
            app.open_step(path_id, ids[0], None)
        );

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(backend.content_calls(), 1);
    }

    #[tokio::test]
    async fn existing_content_skips_generation() {
        let store = MemoryStore::default();
        let (path_id, ids) = store.seed_path(&[InProgress]);
        store.add_resource(resource(ids[0], ResourceType::Reference, "Book"));
        let (app, _, backend) = signed_out_app(store);

        let view = app.open_step(path_id, ids[0], None).await.unwrap();

        assert!(!view.generated);
        assert_eq!(backend.content_calls(), 0);
        assert_eq!(view.rendered().len(), 1);
    }

    #[tokio::test]
    async fn unknown_status_cannot_be_marked_done() {
        let store = MemoryStore::default();
        let (path_id, ids) = store.seed_path(&[Unknown, InProgress]);
        store.add_resource(resource(ids[0], ResourceType::Reference, "Book"));
        let (app, _, _) = signed_out_app(store);

        let view = app.open_step(path_id, ids[0], None).await.unwrap();

        assert!(!view.can_mark_done());
    }

    #[tokio::test]
    async fn failed_generation_is_reported() {
        let store = MemoryStore::default();
        let (path_id, ids) = store.seed_path(&[NotStarted]);
        let (app, _, backend) = app(store);
        backend.fail_content(AiError::Api { status: 500, message: "model overloaded".into() });

        let error = app.open_step(path_id, ids[0], None).await.unwrap_err();

        assert!(error.to_string().contains("model overloaded"));
        assert!(error.is_recoverable());
    }

    #[tokio::test]
    async fn filter_follows_path_preference() {
        let (store, path_id, ids) = store_with_format(PreferredFormat::Videos).await;
        store.add_resource(resource(ids[0], ResourceType::Text, "Notes"));
        store.add_resource(resource(ids[0], ResourceType::Video, "Talk"));
        let (app, _, _) = app(store);

        let view = app.open_step(path_id, ids[0], None).await.unwrap();

        assert_eq!(view.filter, FormatFilter::Videos);
    }

    #[tokio::test]
    async fn filter_override_wins() {
        let (store, path_id, ids) = store_with_format(PreferredFormat::Videos).await;
        store.add_resource(resource(ids[0], ResourceType::Text, "Notes"));
        let (app, _, _) = app(store);

        let view = app.open_step(path_id, ids[0], Some(FormatFilter::Text)).await.unwrap();

        assert_eq!(view.filter, FormatFilter::Text);
        assert_eq!(view.rendered().len(), 1);
    }

    #[tokio::test]
    async fn path_without_preference_shows_everything() {
        let store = MemoryStore::default();
        let (path_id, ids) = store.seed_path(&[InProgress]);
        store.add_resource(resource(ids[0], ResourceType::Image, "Diagram"));
        let (app, _, _) = app(store);

        let view = app.open_step(path_id, ids[0], None).await.unwrap();

        assert_eq!(view.filter, FormatFilter::Mixed);
    }

    #[tokio::test]
    async fn mark_done_completes_and_returns_to_path() {
        let store = MemoryStore::default();
        let (path_id, ids) = store.seed_path(&[InProgress, NotStarted]);
        let (app, store, _) = app(store);

        let transition = app.mark_done(path_id, ids[0]).await.unwrap();

        assert_eq!(transition.screen, Screen::Path(path_id));
        assert_eq!(transition.notice.unwrap().title, "Step completed");
        assert_eq!(store.step(ids[0]).status, Completed);
        assert_eq!(store.path(path_id).progress_percentage, 50);
    }
}
