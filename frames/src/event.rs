//! Typed chat events carried inside frames.
//!
//! DESIGN
//! ======
//! The channel speaks two small vocabularies. Outbound (client → server):
//! `typing-start`, `typing-stop`, `message`. Inbound (server → client):
//! `typing-user-list`, `message`. Payloads are plain JSON: a bare string for
//! the typing events, an array of strings for the user list, and
//! `{ senderName, text }` for messages.
//!
//! Inbound payloads are a trust boundary. Decoding checks the JSON shape and
//! nothing else: duplicate names in a user list are kept as sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Frame;

pub const TYPING_START: &str = "typing-start";
pub const TYPING_STOP: &str = "typing-stop";
pub const MESSAGE: &str = "message";
pub const TYPING_USER_LIST: &str = "typing-user-list";

/// Error returned when a frame does not carry a known, well-formed event.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("unknown event: {0}")]
    Unknown(String),
    #[error("malformed `{event}` payload: {source}")]
    Payload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// One chat line. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender_name: String,
    pub text: String,
}

impl ChatMessage {
    pub fn new(sender_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { sender_name: sender_name.into(), text: text.into() }
    }

    /// Whether this message was sent under `name`.
    #[must_use]
    pub fn is_from(&self, name: &str) -> bool {
        self.sender_name == name
    }
}

// =============================================================================
// OUTBOUND
// =============================================================================

/// Event emitted by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutboundEvent {
    TypingStart(String),
    TypingStop(String),
    Message(ChatMessage),
}

impl OutboundEvent {
    /// Wire name of this event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypingStart(_) => TYPING_START,
            Self::TypingStop(_) => TYPING_STOP,
            Self::Message(_) => MESSAGE,
        }
    }

    /// Wrap this event in a fresh frame.
    #[must_use]
    pub fn to_frame(&self) -> Frame {
        let data = match self {
            Self::TypingStart(name) | Self::TypingStop(name) => Value::String(name.clone()),
            Self::Message(message) => message_value(message),
        };
        Frame::new(self.name(), data)
    }

    /// Parse an outbound event out of a frame (the server-side view).
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Unknown`] for event names outside the outbound
    /// vocabulary and [`EventError::Payload`] when the payload has the wrong shape.
    pub fn from_frame(frame: &Frame) -> Result<Self, EventError> {
        match frame.event.as_str() {
            TYPING_START => Ok(Self::TypingStart(parse_payload(TYPING_START, &frame.data)?)),
            TYPING_STOP => Ok(Self::TypingStop(parse_payload(TYPING_STOP, &frame.data)?)),
            MESSAGE => Ok(Self::Message(parse_payload(MESSAGE, &frame.data)?)),
            other => Err(EventError::Unknown(other.to_owned())),
        }
    }
}

// =============================================================================
// INBOUND
// =============================================================================

/// Event received from the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    /// Everyone the server currently considers typing. Replaces the previous list.
    TypingUserList(Vec<String>),
    Message(ChatMessage),
}

impl InboundEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypingUserList(_) => TYPING_USER_LIST,
            Self::Message(_) => MESSAGE,
        }
    }

    /// Wrap this event in a fresh frame (the server-side view).
    #[must_use]
    pub fn to_frame(&self) -> Frame {
        let data = match self {
            Self::TypingUserList(names) => {
                Value::Array(names.iter().cloned().map(Value::String).collect())
            }
            Self::Message(message) => message_value(message),
        };
        Frame::new(self.name(), data)
    }

    /// Parse an inbound event out of a frame.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Unknown`] for event names outside the inbound
    /// vocabulary and [`EventError::Payload`] when the payload has the wrong shape.
    pub fn from_frame(frame: &Frame) -> Result<Self, EventError> {
        match frame.event.as_str() {
            TYPING_USER_LIST => Ok(Self::TypingUserList(parse_payload(TYPING_USER_LIST, &frame.data)?)),
            MESSAGE => Ok(Self::Message(parse_payload(MESSAGE, &frame.data)?)),
            other => Err(EventError::Unknown(other.to_owned())),
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn message_value(message: &ChatMessage) -> Value {
    serde_json::to_value(message).unwrap_or(Value::Null)
}

fn parse_payload<T>(event: &'static str, data: &Value) -> Result<T, EventError>
where
    T: serde::de::DeserializeOwned,
{
    T::deserialize(data).map_err(|source| EventError::Payload { event, source })
}

#[cfg(test)]
#[path = "event_test.rs"]
mod tests;
