//! Backend with canned answers for flow tests

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use uuid::Uuid;

use super::{AiError, ChatRequest, GeneratePathRequest, GeneratePathResponse, LearningBackend};
use crate::model::{ResourceType, StepResource};
use crate::store::memory::MemoryStore;

pub struct ScriptedBackend {
    pub path_result: Mutex<Result<GeneratePathResponse, AiError>>,
    pub content_result: Mutex<Result<(), AiError>>,
    pub chat_result: Mutex<Result<String, AiError>>,
    /// Store that generated step content is written into
    pub content_store: Option<Arc<MemoryStore>>,
    pub delay: Duration,
    pub path_calls: AtomicUsize,
    pub content_calls: AtomicUsize,
    pub chat_calls: AtomicUsize,
    pub last_chat: Mutex<Option<ChatRequest>>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self {
            path_result: Mutex::new(Ok(GeneratePathResponse {
                path_id: Uuid::new_v4(),
                steps_count: 6,
            })),
            content_result: Mutex::new(Ok(())),
            chat_result: Mutex::new(Ok("Happy to help!".to_string())),
            content_store: None,
            delay: Duration::ZERO,
            path_calls: AtomicUsize::new(0),
            content_calls: AtomicUsize::new(0),
            chat_calls: AtomicUsize::new(0),
            last_chat: Mutex::new(None),
        }
    }
}

impl ScriptedBackend {
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        Self { content_store: Some(store), ..Default::default() }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fail_path(&self, error: AiError) {
        *self.path_result.lock().unwrap() = Err(error);
    }

    pub fn fail_content(&self, error: AiError) {
        *self.content_result.lock().unwrap() = Err(error);
    }

    pub fn set_chat(&self, result: Result<String, AiError>) {
        *self.chat_result.lock().unwrap() = result;
    }

    pub fn path_calls(&self) -> usize {
        self.path_calls.load(Ordering::SeqCst)
    }

    pub fn content_calls(&self) -> usize {
        self.content_calls.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl LearningBackend for ScriptedBackend {
    async fn generate_path(
        &self,
        _request: &GeneratePathRequest,
    ) -> Result<GeneratePathResponse, AiError> {
        self.path_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.path_result.lock().unwrap().clone()
    }

    async fn generate_step_content(&self, step_id: Uuid) -> Result<(), AiError> {
        self.content_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        let result = self.content_result.lock().unwrap().clone();
        if result.is_ok() {
            if let Some(store) = &self.content_store {
                store.add_resource(StepResource {
                    id: Uuid::new_v4(),
                    step_id,
                    title: "Overview".into(),
                    url: "Generated overview of the step.".into(),
                    resource_type: ResourceType::Text,
                });
                store.add_resource(StepResource {
                    id: Uuid::new_v4(),
                    step_id,
                    title: "Walkthrough".into(),
                    url: r#"{"query":"step walkthrough","channel":"Tutorials"}"#.into(),
                    resource_type: ResourceType::Video,
                });
            }
        }
        result
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, AiError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_chat.lock().unwrap() = Some(request.clone());
        self.pause().await;
        self.chat_result.lock().unwrap().clone()
    }
}
