//! Jittered exponential backoff for reconnect attempts.

use std::time::Duration;

use rand::Rng;

use crate::config::{RECONNECT_JITTER, ReconnectPolicy};

#[derive(Clone, Debug)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    jitter: f64,
    attempts: u32,
}

impl Backoff {
    #[must_use]
    pub fn new(initial: Duration, max: Duration, jitter: f64) -> Self {
        Self { initial, max, jitter: jitter.clamp(0.0, 1.0), attempts: 0 }
    }

    #[must_use]
    pub fn from_policy(policy: &ReconnectPolicy) -> Self {
        Self::new(policy.initial, policy.max, RECONNECT_JITTER)
    }

    /// Delay before the next attempt: `initial * 2^attempts`, randomized by
    /// ±jitter and capped at `max`.
    pub fn next_delay(&mut self) -> Duration {
        let base = self
            .initial
            .saturating_mul(2_u32.saturating_pow(self.attempts))
            .min(self.max);
        self.attempts = self.attempts.saturating_add(1);

        if self.jitter <= 0.0 {
            return base;
        }
        let factor = rand::rng().random_range((1.0 - self.jitter)..=(1.0 + self.jitter));
        base.mul_f64(factor).min(self.max)
    }

    /// Start over after a successful connect.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

#[cfg(test)]
#[path = "backoff_test.rs"]
mod tests;
