//! Error types for the table store

use thiserror::Error;

/// Errors that can occur when reading or writing table rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Transport failure before a response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// The bearer token was rejected
    #[error("Session expired. Sign in again")]
    Unauthorized,

    /// The store answered with an error status
    #[error("Store error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the store
        message: String,
    },

    /// Response body did not match the expected row shape
    #[error("Unexpected response from store: {0}")]
    Decode(String),

    /// An insert or single-row read returned nothing
    #[error("No row returned from {0}")]
    MissingRow(&'static str),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else {
            StoreError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}

impl StoreError {
    /// Check if retrying the same action could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Network(_) | StoreError::Api { status: 500..=599, .. })
    }

    /// Check if this error requires signing in again
    pub fn requires_reauth(&self) -> bool {
        matches!(self, StoreError::Unauthorized | StoreError::Api { status: 401 | 403, .. })
    }
}
