//! Session state: identity, draft, and message history.
//!
//! DESIGN
//! ======
//! Plain owned state with no I/O. The chat session (`client.rs`) wraps it with
//! the channel and view; this module only stores. History is append-only and
//! insertion-ordered: entries are never removed, mutated, or deduplicated.

use frames::ChatMessage;

/// The local user's display name. Empty means not yet joined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalUserIdentity {
    pub name: String,
}

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    identity: LocalUserIdentity,
    draft: String,
    messages: Vec<ChatMessage>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the display name. Raw text is stored as-is.
    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.identity.name = name.into();
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.identity.name
    }

    /// Sending and typing notification need a non-empty name.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.identity.name.is_empty()
    }

    /// Replace the in-progress composer text.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Take the draft out for sending, leaving it empty.
    pub fn take_draft(&mut self) -> String {
        std::mem::take(&mut self.draft)
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
