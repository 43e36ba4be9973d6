//! Application flows
//!
//! `App` ties a table store and an AI backend to the signed-in user and
//! exposes the actions behind each screen: onboarding, dashboard, path
//! timeline, step viewer and the chat assistant.

pub mod assistant;
pub mod command;
pub mod dashboard;
pub mod error;
pub mod generate;
pub mod onboarding;
pub mod state;
pub mod step;
pub mod timeline;

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::ai::LearningBackend;
use crate::auth::AuthError;
use crate::store::TableStore;
pub use assistant::Assistant;
pub use error::FlowError;
pub use generate::{GenerationStage, GenerationTrigger};
pub use onboarding::{OnboardingForm, WizardStage};
pub use state::{Notice, NoticeKind, PanelState, Screen, Transition};

/// The application context shared by all flows
pub struct App<S, B> {
    /// Table store, scoped to the user by the store itself
    store: Arc<S>,

    /// AI functions
    backend: Arc<B>,

    /// Signed-in user, if any
    user_id: Option<Uuid>,

    /// Deduplicating generation requests
    generator: GenerationTrigger<B>,
}

impl<S, B> App<S, B>
where
    S: TableStore,
    B: LearningBackend + 'static,
{
    /// Create a new application context
    pub fn new(store: Arc<S>, backend: Arc<B>, user_id: Option<Uuid>, pacing: Duration) -> Self {
        let generator = GenerationTrigger::new(Arc::clone(&backend), pacing);
        Self { store, backend, user_id, generator }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }

    fn require_user(&self) -> Result<Uuid, FlowError> {
        self.user_id.ok_or(FlowError::Auth(AuthError::NotSignedIn))
    }
}
