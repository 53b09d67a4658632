//! Typing presence: local typing state machine and the remote typing set.
//!
//! DESIGN
//! ======
//! Two states, `Idle` and `Typing`. The first draft edit while idle announces
//! `typing-start`; every edit (re)arms a debounce timer; the timer firing or
//! an explicit send announces `typing-stop` and returns to idle.
//!
//! TIMER
//! =====
//! At most one timer is live. Arming always cancels the previous one first.
//! A timer is a spawned sleep that posts `TimerExpired { generation }` into
//! the session's event queue instead of touching state itself, so all state
//! changes stay on the session's single serial loop. An expiry that was
//! already queued when its timer got cancelled carries an old generation and
//! is ignored.

use std::time::Duration;

use frames::OutboundEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::channel::Channel;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypingState {
    Idle,
    /// Typing was announced under `announced_as`; the stop uses the same name.
    Typing { announced_as: String },
}

/// Posted by a debounce timer when its window elapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerExpired {
    generation: u64,
}

/// Owned handle to the one pending timer. Dropping it cancels the sleep.
struct DebounceTimer {
    generation: u64,
    task: JoinHandle<()>,
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct TypingCoordinator {
    state: TypingState,
    window: Duration,
    timer: Option<DebounceTimer>,
    next_generation: u64,
    expired_tx: mpsc::UnboundedSender<TimerExpired>,
    remote: Vec<String>,
}

impl TypingCoordinator {
    /// Create an idle coordinator. Timer expiries arrive on the returned
    /// receiver and must be fed back through [`Self::on_timer_expired`].
    #[must_use]
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<TimerExpired>) {
        let (expired_tx, expired_rx) = mpsc::unbounded_channel();
        let coordinator = Self {
            state: TypingState::Idle,
            window,
            timer: None,
            next_generation: 0,
            expired_tx,
            remote: Vec::new(),
        };
        (coordinator, expired_rx)
    }

    #[must_use]
    pub fn state(&self) -> &TypingState {
        &self.state
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        matches!(self.state, TypingState::Typing { .. })
    }

    #[must_use]
    pub fn has_pending_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// React to a draft edit by `user_name`.
    ///
    /// An idle coordinator with an empty name stays silent: typing
    /// notification needs a joined user.
    pub fn on_draft_edited(&mut self, user_name: &str, channel: &impl Channel) {
        if self.state == TypingState::Idle {
            if user_name.is_empty() {
                return;
            }
            debug!(user = user_name, "typing started");
            channel.emit(OutboundEvent::TypingStart(user_name.to_owned()));
            self.state = TypingState::Typing { announced_as: user_name.to_owned() };
        }
        self.arm_timer();
    }

    /// Handle a timer expiry. Returns `false` for a stale expiry.
    pub fn on_timer_expired(&mut self, expired: TimerExpired, channel: &impl Channel) -> bool {
        let current = self.timer.as_ref().map(|timer| timer.generation);
        if current != Some(expired.generation) {
            debug!(generation = expired.generation, "stale typing timer ignored");
            return false;
        }
        self.timer = None;
        self.stop(channel);
        true
    }

    /// Cancel any pending timer and stop typing now. Used on send.
    pub fn force_stop(&mut self, channel: &impl Channel) {
        self.cancel_timer();
        self.stop(channel);
    }

    fn stop(&mut self, channel: &impl Channel) {
        if let TypingState::Typing { announced_as } = std::mem::replace(&mut self.state, TypingState::Idle) {
            debug!(user = %announced_as, "typing stopped");
            channel.emit(OutboundEvent::TypingStop(announced_as));
        }
    }

    fn cancel_timer(&mut self) {
        // Drop aborts the sleep task.
        drop(self.timer.take());
    }

    fn arm_timer(&mut self) {
        self.cancel_timer();

        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);

        // The window runs from the edit, not from the task's first poll.
        let deadline = tokio::time::Instant::now() + self.window;
        let expired_tx = self.expired_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = expired_tx.send(TimerExpired { generation });
        });
        self.timer = Some(DebounceTimer { generation, task });
    }

    // =========================================================================
    // REMOTE
    // =========================================================================

    /// Replace the remote typing set wholesale with the server's list.
    pub fn replace_remote_typing(&mut self, names: Vec<String>) {
        self.remote = names;
    }

    #[must_use]
    pub fn remote_typing(&self) -> &[String] {
        &self.remote
    }

    /// Human-readable typing line for `local_name`'s screen.
    #[must_use]
    pub fn typing_display(&self, local_name: &str) -> String {
        typing_display(&self.remote, local_name)
    }
}

/// Join every remote typer except `local_name`, or return an empty string.
#[must_use]
pub fn typing_display(remote: &[String], local_name: &str) -> String {
    let others: Vec<&str> = remote
        .iter()
        .map(String::as_str)
        .filter(|name| *name != local_name)
        .collect();

    match others.len() {
        0 => String::new(),
        1 => format!("{} is typing…", others[0]),
        _ => format!("{} are typing…", others.join(", ")),
    }
}

#[cfg(test)]
#[path = "presence_test.rs"]
mod tests;
