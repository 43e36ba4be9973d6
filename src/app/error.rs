//! Error type shared by the application flows

use thiserror::Error;

use crate::ai::AiError;
use crate::auth::AuthError;
use crate::store::StoreError;

/// Why a flow could not finish
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// No signed-in user
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Table store request failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// AI function failed or answered with an unusable body
    #[error(transparent)]
    Ai(#[from] AiError),

    /// A row the flow depends on does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// User input was rejected before any request
    #[error("{0}")]
    Invalid(String),
}

impl FlowError {
    /// Check if re-triggering the same action could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            FlowError::Store(e) => e.is_recoverable(),
            FlowError::Ai(e) => e.is_recoverable(),
            FlowError::Auth(_) | FlowError::NotFound(_) | FlowError::Invalid(_) => false,
        }
    }

    /// Check if the user has to sign in (again) first
    pub fn requires_reauth(&self) -> bool {
        match self {
            FlowError::Auth(_) => true,
            FlowError::Store(e) => e.requires_reauth(),
            FlowError::Ai(e) => e.requires_reauth(),
            FlowError::NotFound(_) | FlowError::Invalid(_) => false,
        }
    }
}
