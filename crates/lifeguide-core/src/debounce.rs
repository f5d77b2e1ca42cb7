//! Timestamp-based debounce gate.
//!
//! Pure state: the caller supplies `now`, so the gate works with any clock and
//! is trivially testable. Typical use is search-as-you-type: call
//! [`Debounce::input`] on every keystroke and [`Debounce::ready`] on every
//! tick; the query is sent once input has been quiet for the interval.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debounce {
    interval: Duration,
    last_input: Option<Instant>,
}

impl Debounce {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_input: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records input at `now`, restarting the quiet period.
    pub fn input(&mut self, now: Instant) {
        self.last_input = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.last_input.is_some()
    }

    /// Returns `true` once per burst of input, when the interval has elapsed
    /// since the last input.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last_input {
            Some(at) if now.saturating_duration_since(at) >= self.interval => {
                self.last_input = None;
                true
            }
            _ => false,
        }
    }

    /// Drops pending input without firing.
    pub fn cancel(&mut self) {
        self.last_input = None;
    }
}
