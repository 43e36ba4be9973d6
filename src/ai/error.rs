//! Error types for the AI functions

use thiserror::Error;

/// Errors that can occur when calling the generation and chat functions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// Functions base URL is not configured
    #[error("AI functions URL not configured. Run `pathwise config set functions-url <url>`")]
    NotConfigured,

    /// Transport failure before a response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// The function answered with an error status
    #[error("AI request failed ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// `error` field of the body, or the raw body
        message: String,
    },

    /// Success status but the body had the wrong shape
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    /// Chat reply was missing or blank
    #[error("AI returned empty response")]
    EmptyReply,
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AiError::MalformedResponse(e.to_string())
        } else {
            AiError::Network(e.to_string())
        }
    }
}

impl AiError {
    /// Check if the user can retry the same action
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AiError::Network(_)
                | AiError::MalformedResponse(_)
                | AiError::EmptyReply
                | AiError::Api { status: 429 | 500..=599, .. }
        )
    }

    /// Check if this error requires signing in again
    pub fn requires_reauth(&self) -> bool {
        matches!(self, AiError::Api { status: 401, .. })
    }
}
