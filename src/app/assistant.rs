//! Chat assistant state
//!
//! Turns live only in memory. Each submit sends the whole history, plus the
//! optional path scope, and appends exactly one assistant turn: the reply,
//! or a readable error in its place. A reply that arrives after the
//! conversation was left or cleared is dropped.

use uuid::Uuid;

use super::state::PanelState;
use crate::ai::{AiError, ChatMessage, ChatRequest, LearningBackend};

/// Turn appended when there is no session to send with
pub const SIGN_IN_MESSAGE: &str = "Please sign in again to use the AI assistant.";

/// Turn appended when an error carries no message of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// A request handed out by [`Assistant::begin`], to be settled with [`Assistant::finish`]
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReply {
    pub request: ChatRequest,
    epoch: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Assistant {
    path_id: Option<Uuid>,
    messages: Vec<ChatMessage>,
    panel: PanelState,
    busy: bool,
    /// Bumped whenever the conversation is discarded
    epoch: u64,
}

impl Assistant {
    pub fn new(path_id: Option<Uuid>) -> Self {
        Self { path_id, ..Default::default() }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn path_id(&self) -> Option<Uuid> {
        self.path_id
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn toggle(&mut self) -> PanelState {
        self.panel = self.panel.toggled();
        self.panel
    }

    /// Start a submit
    ///
    /// Blank input and submits while a reply is pending do nothing. Without
    /// a session the sign-in notice is appended and nothing is sent.
    pub fn begin(&mut self, input: &str, signed_in: bool) -> Option<PendingReply> {
        let input = input.trim();
        if input.is_empty() || self.busy {
            return None;
        }
        if !signed_in {
            self.messages.push(ChatMessage::assistant(SIGN_IN_MESSAGE));
            return None;
        }

        self.messages.push(ChatMessage::user(input));
        self.busy = true;
        Some(PendingReply {
            request: ChatRequest { messages: self.messages.clone(), path_id: self.path_id },
            epoch: self.epoch,
        })
    }

    /// Settle a pending submit, returning false if its conversation is gone
    pub fn finish(&mut self, pending: PendingReply, result: Result<String, AiError>) -> bool {
        if pending.epoch != self.epoch {
            tracing::debug!("Dropping chat reply for a discarded conversation");
            return false;
        }
        self.busy = false;

        let content = match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Chat error: {}", e);
                error_text(&e)
            }
        };
        self.messages.push(ChatMessage::assistant(content));
        true
    }

    /// Send `input` and wait for the assistant turn
    ///
    /// Returns whether a request went out.
    pub async fn submit<B: LearningBackend>(
        &mut self,
        backend: &B,
        input: &str,
        signed_in: bool,
    ) -> bool {
        let Some(pending) = self.begin(input, signed_in) else {
            return false;
        };
        let result = backend.chat(&pending.request).await;
        self.finish(pending, result);
        true
    }

    /// Drop the conversation, as when the chat is closed for good
    pub fn leave(&mut self) {
        self.clear();
        self.panel = PanelState::Closed;
    }

    /// Drop all turns and any pending reply
    pub fn clear(&mut self) {
        self.messages.clear();
        self.busy = false;
        self.epoch += 1;
    }

    /// Move the conversation to another path scope, starting over
    pub fn set_path(&mut self, path_id: Option<Uuid>) {
        if self.path_id != path_id {
            self.clear();
            self.path_id = path_id;
        }
    }
}

/// Text of the assistant turn standing in for a failed reply
pub fn error_text(error: &AiError) -> String {
    match error {
        AiError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
        AiError::Api { .. } => FALLBACK_ERROR_MESSAGE.to_string(),
        other => other.to_string(),
    }
}
