#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

use serde::Serialize;
use serde_json::Value;

/// Fixed prompt sent with the image when the user requests support.
pub const SUPPORT_PROMPT: &str = "Help the student answer the questions in the image";

/// Error returned by [`parse`].
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The inbound text was not valid JSON.
    #[error("malformed inbound frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A single outbound message on the assistant wire protocol.
///
/// The `image` key is omitted entirely (not serialized as null) for plain
/// chat questions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutboundFrame {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OutboundFrame {
    /// Initiating frame for a support session: the fixed prompt plus the
    /// base64 payload of the active image.
    #[must_use]
    pub fn support_request(image: String) -> Self {
        Self {
            question: SUPPORT_PROMPT.to_owned(),
            image: Some(image),
        }
    }

    /// Follow-up frame carrying a user-typed question.
    #[must_use]
    pub fn user_question(text: &str) -> Self {
        Self {
            question: text.to_owned(),
            image: None,
        }
    }

    /// Serialize to wire text.
    #[must_use]
    pub fn to_wire(&self) -> String {
        // Serializing a string/option struct to a String is infallible.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Decode one inbound frame.
///
/// # Errors
///
/// Returns [`FrameError::Malformed`] when `text` is not valid JSON; callers
/// log and drop the frame rather than fault.
pub fn parse(text: &str) -> Result<Value, FrameError> {
    Ok(serde_json::from_str(text)?)
}

/// Resolve the display text for an inbound payload: an `answer` field, else
/// a `message` field, else the stringified payload.
#[must_use]
pub fn display_text(payload: &Value) -> String {
    payload
        .get("answer")
        .and_then(Value::as_str)
        .or_else(|| payload.get("message").and_then(Value::as_str))
        .map_or_else(|| payload.to_string(), ToOwned::to_owned)
}
