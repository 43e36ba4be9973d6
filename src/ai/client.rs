//! HTTP client for the serverless AI functions

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::LearningBackend;
use super::error::AiError;
use super::models::{
    ChatRequest, ChatResponse, GeneratePathRequest, GeneratePathResponse,
    GenerateStepContentRequest,
};

/// Client for the generation and chat functions
pub struct FunctionsClient {
    /// HTTP client
    client: Client,
    /// Base URL the function names are appended to
    base_url: String,
    /// User bearer token
    access_token: String,
}

impl FunctionsClient {
    const GENERATE_PATH: &'static str = "generate-path";
    const GENERATE_STEP_CONTENT: &'static str = "generate-step-content";
    const CHAT: &'static str = "ai-chat";

    /// Create a client. `timeout` of `None` waits indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, AiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AiError::NotConfigured);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url, access_token: access_token.into() })
    }

    fn function_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    /// POST a JSON body and return the raw response text of a success status
    async fn post<B: Serialize + ?Sized>(&self, name: &str, body: &B) -> Result<String, AiError> {
        tracing::debug!("calling function {}", name);
        let response = self
            .client
            .post(self.function_url(name))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        Ok(text)
    }

    async fn post_json<B, T>(&self, name: &str, body: &B) -> Result<T, AiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.post(name, body).await?;
        serde_json::from_str(&text).map_err(|e| AiError::MalformedResponse(e.to_string()))
    }
}

/// Map a failed status to an API error carrying the backend's message
fn status_error(status: StatusCode, body: &str) -> AiError {
    AiError::Api { status: status.as_u16(), message: error_message(body) }
}

/// Extract the `error` field of a JSON error body, falling back to the raw text
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    match parsed.as_ref().and_then(|v| v.get("error")) {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None if body.trim().is_empty() => "AI request failed".to_string(),
        None => body.to_string(),
    }
}

/// Validate a chat response body
fn reply_text(response: ChatResponse) -> Result<String, AiError> {
    match response.reply {
        Some(reply) if !reply.trim().is_empty() => Ok(reply),
        _ => Err(AiError::EmptyReply),
    }
}

impl LearningBackend for FunctionsClient {
    async fn generate_path(
        &self,
        request: &GeneratePathRequest,
    ) -> Result<GeneratePathResponse, AiError> {
        self.post_json(Self::GENERATE_PATH, request).await
    }

    async fn generate_step_content(&self, step_id: Uuid) -> Result<(), AiError> {
        self.post(Self::GENERATE_STEP_CONTENT, &GenerateStepContentRequest { step_id }).await?;
        Ok(())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, AiError> {
        let response: ChatResponse = self.post_json(Self::CHAT, request).await?;
        reply_text(response)
    }
}
