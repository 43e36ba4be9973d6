//! Generation requests with deduplication
//!
//! A generation request is identified by its input. Triggering the same
//! request while it is in flight joins the outstanding call instead of
//! issuing another; once it has succeeded the cached response is returned.
//! Failures are forgotten so the user can trigger the request again.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use uuid::Uuid;

use crate::ai::{AiError, GeneratePathRequest, GeneratePathResponse, LearningBackend};

type SharedRequest<V> = Shared<BoxFuture<'static, Result<V, AiError>>>;

/// Runs at most one request per key
pub struct RequestDeduplicator<K, V> {
    requests: Mutex<HashMap<K, SharedRequest<V>>>,
}

impl<K, V> Default for RequestDeduplicator<K, V> {
    fn default() -> Self {
        Self { requests: Mutex::new(HashMap::new()) }
    }
}

impl<K, V> RequestDeduplicator<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone + Send + Sync + 'static,
{
    fn lock(&self) -> MutexGuard<'_, HashMap<K, SharedRequest<V>>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `start` for `key` unless a request for it is pending or has succeeded
    pub async fn run<F>(&self, key: K, start: impl FnOnce() -> F) -> Result<V, AiError>
    where
        F: Future<Output = Result<V, AiError>> + Send + 'static,
    {
        let request = {
            let mut requests = self.lock();
            requests.entry(key.clone()).or_insert_with(|| start().boxed().shared()).clone()
        };

        let result = request.clone().await;

        if result.is_err() {
            let mut requests = self.lock();
            if requests.get(&key).is_some_and(|current| current.ptr_eq(&request)) {
                requests.remove(&key);
            }
        }

        result
    }

    /// Number of keys with a pending or completed request
    pub fn tracked(&self) -> usize {
        self.lock().len()
    }
}

/// Progress messages shown while a path is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Analyzing,
    Designing,
}

impl GenerationStage {
    pub fn message(&self) -> &'static str {
        match self {
            GenerationStage::Analyzing => "Analyzing your learning preferences...",
            GenerationStage::Designing => "Designing your personalized learning path...",
        }
    }
}

/// Issues path and step content generation through the backend
pub struct GenerationTrigger<B> {
    backend: Arc<B>,
    paths: RequestDeduplicator<GeneratePathRequest, GeneratePathResponse>,
    contents: RequestDeduplicator<Uuid, ()>,
    /// Pause between the two status messages
    pacing: Duration,
}

impl<B: LearningBackend + 'static> GenerationTrigger<B> {
    pub fn new(backend: Arc<B>, pacing: Duration) -> Self {
        Self {
            backend,
            paths: RequestDeduplicator::default(),
            contents: RequestDeduplicator::default(),
            pacing,
        }
    }

    /// Generate a path, reporting stages through `on_stage`
    pub async fn generate_path(
        &self,
        request: GeneratePathRequest,
        on_stage: &mut (dyn FnMut(GenerationStage) + Send),
    ) -> Result<GeneratePathResponse, AiError> {
        on_stage(GenerationStage::Analyzing);
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
        on_stage(GenerationStage::Designing);

        let backend = Arc::clone(&self.backend);
        let key = request.clone();
        let response = self
            .paths
            .run(key, move || async move { backend.generate_path(&request).await })
            .await?;

        tracing::info!(
            "Generated path {} with {} steps",
            response.path_id,
            response.steps_count
        );
        Ok(response)
    }

    /// Generate the resources of one step
    pub async fn generate_step_content(&self, step_id: Uuid) -> Result<(), AiError> {
        let backend = Arc::clone(&self.backend);
        self.contents
            .run(step_id, move || async move { backend.generate_step_content(step_id).await })
            .await
    }
}
