//! AI function integration
//!
//! Path generation, step content generation and chat are all delegated to
//! hosted functions. Each call is a single request/response with no
//! streaming, polling or retries.

pub mod client;
pub mod error;
pub mod models;
#[cfg(test)]
pub mod scripted;

use std::future::Future;

use uuid::Uuid;

pub use client::FunctionsClient;
pub use error::AiError;
pub use models::{ChatMessage, ChatRequest, GeneratePathRequest, GeneratePathResponse, Role};

/// Calls the application makes to the AI functions
pub trait LearningBackend: Send + Sync {
    /// Generate a path and its steps from a stored preference
    fn generate_path(
        &self,
        request: &GeneratePathRequest,
    ) -> impl Future<Output = Result<GeneratePathResponse, AiError>> + Send;

    /// Fill in the resources of one step; they are read back from the store
    fn generate_step_content(
        &self,
        step_id: Uuid,
    ) -> impl Future<Output = Result<(), AiError>> + Send;

    /// One chat exchange, returning the assistant reply
    fn chat(&self, request: &ChatRequest) -> impl Future<Output = Result<String, AiError>> + Send;
}
