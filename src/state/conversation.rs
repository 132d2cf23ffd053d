#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::net::frame;

/// A single chat message, local echo or assistant reply.
#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub text: String,
    pub is_user: bool,
    /// Milliseconds since the Unix epoch when the message was appended.
    pub timestamp: i64,
}

/// Conversation state for the support chat.
///
/// The message log and the active flag always move together: `reset` clears
/// both, `start_session` arms the flag on a log already emptied by the last
/// reset. Fields are private so every mutation goes through those
/// transitions and the pairing cannot drift.
#[derive(Clone, Debug, Default)]
pub struct ConversationState {
    messages: Vec<ChatMessage>,
    active: bool,
}

impl ConversationState {
    /// Messages in insertion order. Never reordered.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether a support session is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Append a user message. Whitespace-only text is rejected.
    ///
    /// Returns `true` when a message was appended.
    pub fn push_user(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.messages.push(ChatMessage {
            text: text.to_owned(),
            is_user: true,
            timestamp: now_ms(),
        });
        true
    }

    /// Append an assistant reply from a decoded inbound payload.
    ///
    /// Display text prefers an `answer` field, then `message`, then the
    /// stringified payload, so no inbound frame is ever silently dropped.
    pub fn push_assistant(&mut self, payload: &Value) {
        self.messages.push(ChatMessage {
            text: frame::display_text(payload),
            is_user: false,
            timestamp: now_ms(),
        });
    }

    /// Mark the support session active.
    pub fn start_session(&mut self) {
        self.active = true;
    }

    /// End the session and clear the log.
    pub fn reset(&mut self) {
        self.active = false;
        self.messages.clear();
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}
