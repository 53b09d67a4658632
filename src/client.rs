//! Chat session: the single serial handler for every client event.
//!
//! DESIGN
//! ======
//! `ChatSession` composes the session state, the typing coordinator, an
//! outbound [`Channel`] and a [`View`]. Callers feed it one event at a time:
//! user edits and sends, inbound channel events, and typing timer expiries.
//! Nothing here blocks or awaits.
//!
//! The view is told about every appended message (re-render and scroll to
//! bottom) and about every change of the derived typing line.

use std::time::Duration;

use frames::{ChatMessage, InboundEvent, OutboundEvent};
use tokio::sync::mpsc;
use tracing::debug;

use crate::channel::Channel;
use crate::presence::{TimerExpired, TypingCoordinator};
use crate::session::SessionState;

/// Presentation seam.
pub trait View {
    /// A message was appended to history. `own` is true when it was sent
    /// under the local user's current name.
    fn message_appended(&mut self, message: &ChatMessage, own: bool);

    /// The derived typing line changed. Empty means nobody else is typing.
    fn typing_changed(&mut self, display: &str);
}

pub struct ChatSession<C, V> {
    state: SessionState,
    presence: TypingCoordinator,
    channel: C,
    view: V,
    typing_line: String,
}

impl<C: Channel, V: View> ChatSession<C, V> {
    /// Create a session with an empty identity. Timer expiries arrive on the
    /// returned receiver and must be passed to [`Self::handle_timer_expired`].
    pub fn new(channel: C, view: V, typing_debounce: Duration) -> (Self, mpsc::UnboundedReceiver<TimerExpired>) {
        let (presence, expired) = TypingCoordinator::new(typing_debounce);
        let session = Self { state: SessionState::new(), presence, channel, view, typing_line: String::new() };
        (session, expired)
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn presence(&self) -> &TypingCoordinator {
        &self.presence
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    #[must_use]
    pub fn typing_display(&self) -> String {
        self.presence.typing_display(self.state.user_name())
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.state.set_user_name(name);
        // The local name filters the typing line.
        self.refresh_typing_line();
    }

    /// Replace the draft as a user edit, driving the typing coordinator.
    pub fn edit_draft(&mut self, text: impl Into<String>) {
        self.state.set_draft(text);
        self.presence.on_draft_edited(self.state.user_name(), &self.channel);
    }

    /// Send the draft. Returns `false` (and does nothing) when the draft or the
    /// user name is empty.
    ///
    /// `typing-stop` follows the message only when typing is still announced;
    /// a stop already sent by the idle timer is not repeated.
    pub fn send_current_draft(&mut self) -> bool {
        if self.state.draft().is_empty() || !self.state.can_send() {
            debug!(draft_empty = self.state.draft().is_empty(), "send ignored");
            return false;
        }

        let text = self.state.take_draft();
        let message = ChatMessage::new(self.state.user_name(), text);
        self.channel.emit(OutboundEvent::Message(message.clone()));
        self.append_message(message);
        self.presence.force_stop(&self.channel);
        true
    }

    pub fn handle_inbound(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::TypingUserList(names) => {
                debug!(count = names.len(), "typing list received");
                self.presence.replace_remote_typing(names);
                self.refresh_typing_line();
            }
            InboundEvent::Message(message) => {
                debug!(sender = %message.sender_name, "message received");
                self.append_message(message);
            }
        }
    }

    pub fn handle_timer_expired(&mut self, expired: TimerExpired) {
        self.presence.on_timer_expired(expired, &self.channel);
    }

    fn append_message(&mut self, message: ChatMessage) {
        let own = message.is_from(self.state.user_name());
        self.view.message_appended(&message, own);
        self.state.append_message(message);
    }

    fn refresh_typing_line(&mut self) {
        let line = self.typing_display();
        if line != self.typing_line {
            self.view.typing_changed(&line);
            self.typing_line = line;
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// View that records every notification.
    #[derive(Default)]
    pub struct RecordingView {
        pub appended: Vec<(ChatMessage, bool)>,
        pub typing_lines: Vec<String>,
    }

    impl View for RecordingView {
        fn message_appended(&mut self, message: &ChatMessage, own: bool) {
            self.appended.push((message.clone(), own));
        }

        fn typing_changed(&mut self, display: &str) {
            self.typing_lines.push(display.to_owned());
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
