//! Signed-in user credentials
//!
//! Session issuance happens outside this crate. A bearer token and user id
//! obtained elsewhere are stored in the system keyring, or supplied through
//! `PATHWISE_ACCESS_TOKEN` and `PATHWISE_USER_ID`.

use keyring::Entry;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Service name for keyring storage
const SERVICE_NAME: &str = "pathwise";
/// Entry name for the credentials
const CREDENTIALS_ENTRY: &str = "session";

const TOKEN_ENV: &str = "PATHWISE_ACCESS_TOKEN";
const USER_ENV: &str = "PATHWISE_USER_ID";

/// Errors from credential storage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credentials are available
    #[error("Not signed in. Run `pathwise login` first")]
    NotSignedIn,

    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    Keyring(String),

    /// Stored credentials could not be read
    #[error("Stored session is corrupt: {0}")]
    Corrupt(String),

    /// Token was empty
    #[error("Access token must not be empty")]
    EmptyToken,
}

/// Bearer token and the user it belongs to
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub user_id: Uuid,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &mask_token(&self.access_token))
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, user_id: Uuid) -> Result<Self, AuthError> {
        let access_token = access_token.into().trim().to_string();
        if access_token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(Self { access_token, user_id })
    }

    /// Read credentials from the environment, then the keyring
    pub fn load() -> Result<Self, AuthError> {
        if let Some(credentials) = Self::from_env() {
            return Ok(credentials);
        }
        Self::from_keyring()
    }

    /// Load credentials, treating any failure as signed out
    pub fn current() -> Option<Self> {
        match Self::load() {
            Ok(credentials) => Some(credentials),
            Err(AuthError::NotSignedIn) => None,
            Err(e) => {
                tracing::warn!("Could not load credentials: {}", e);
                None
            }
        }
    }

    fn from_env() -> Option<Self> {
        let token = std::env::var(TOKEN_ENV).ok()?;
        let user_id = std::env::var(USER_ENV).ok()?.parse().ok()?;
        Self::new(token, user_id).ok()
    }

    fn from_keyring() -> Result<Self, AuthError> {
        Self::read_from(&entry()?)
    }

    /// Store the credentials in the system keyring
    pub fn save(&self) -> Result<(), AuthError> {
        self.write_to(&entry()?)
    }

    /// Delete stored credentials
    pub fn clear() -> Result<(), AuthError> {
        Self::remove_from(&entry()?)
    }

    fn read_from(entry: &Entry) -> Result<Self, AuthError> {
        let stored = entry.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => AuthError::NotSignedIn,
            _ => AuthError::Keyring(e.to_string()),
        })?;
        serde_json::from_str(&stored).map_err(|e| AuthError::Corrupt(e.to_string()))
    }

    fn write_to(&self, entry: &Entry) -> Result<(), AuthError> {
        let json = serde_json::to_string(self).map_err(|e| AuthError::Corrupt(e.to_string()))?;
        entry.set_password(&json).map_err(|e| AuthError::Keyring(e.to_string()))
    }

    fn remove_from(entry: &Entry) -> Result<(), AuthError> {
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AuthError::Keyring(e.to_string())),
        }
    }
}

fn entry() -> Result<Entry, AuthError> {
    Entry::new(SERVICE_NAME, CREDENTIALS_ENTRY).map_err(|e| AuthError::Keyring(e.to_string()))
}

/// Mask a token for display (show first 6 and last 4 chars)
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let prefix: String = chars[..6].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", prefix, suffix)
}
