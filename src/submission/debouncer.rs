//! Trailing-edge debouncer
//!
//! Holds at most one pending deferred action. Scheduling replaces whatever
//! was pending, so only the most recent trigger ever fires. Time is passed in
//! by the caller; the debouncer never reads the clock itself.

use std::time::{Duration, Instant};

/// Default quiet period before a submission is dispatched
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug)]
struct Pending<T> {
    deadline: Instant,
    payload: T,
}

/// Single-slot debounce timer carrying the arguments of the latest trigger
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer, replacing any pending one
    ///
    /// Returns the payload of the timer that was cancelled, if any.
    pub fn schedule(&mut self, now: Instant, payload: T) -> Option<T> {
        let replaced = self.pending.replace(Pending {
            deadline: now + self.delay,
            payload,
        });
        replaced.map(|p| p.payload)
    }

    /// Disarm the timer without firing it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire the timer if its deadline has passed
    ///
    /// A fired timer is disarmed and its payload handed back to the caller.
    pub fn fire_if_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.payload),
            _ => None,
        }
    }

    /// Time left until the pending timer fires, or None when disarmed
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.deadline.saturating_duration_since(now))
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
