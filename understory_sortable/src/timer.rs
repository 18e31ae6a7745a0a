// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline slots for the engine's cooperative tasks.
//!
//! The engine never sleeps or spawns. Each pending task is a deadline on a
//! caller-supplied monotonic millisecond clock; the host calls
//! [`Sortable::advance`](crate::Sortable::advance) at (or after) the earliest
//! [`Sortable::next_deadline`](crate::Sortable::next_deadline).
//!
//! ```
//! use understory_sortable::{Interval, Timer};
//!
//! let mut press = Timer::new();
//! press.schedule(1_000, 250);
//! assert!(!press.fire(1_100));
//! assert!(press.fire(1_250));
//! assert!(!press.is_pending());
//!
//! let mut nudge = Interval::new(5);
//! nudge.start(0);
//! assert_eq!(nudge.deadline(), Some(5));
//! assert!(nudge.fire(7));
//! assert_eq!(nudge.deadline(), Some(12));
//! ```

/// A cancellable one-shot deadline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    due: Option<u64>,
}

impl Timer {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { due: None }
    }

    /// Arms the timer `delay` milliseconds after `now`, replacing any pending deadline.
    pub fn schedule(&mut self, now: u64, delay: u64) {
        self.due = Some(now.saturating_add(delay));
    }

    /// Disarms the timer.
    pub fn cancel(&mut self) {
        self.due = None;
    }

    /// Returns `true` while the timer is armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Returns the pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.due
    }

    /// Disarms and returns `true` if the deadline has been reached.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// A cancellable repeating deadline.
///
/// Missed periods are not replayed: after a late [`fire`](Self::fire), the next
/// deadline is one period after the time it fired.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    next: Option<u64>,
    period: u64,
}

impl Interval {
    /// Creates a stopped interval with the given period in milliseconds.
    #[must_use]
    pub const fn new(period: u64) -> Self {
        Self { next: None, period }
    }

    /// Starts (or restarts) the interval; the first tick is one period after `now`.
    pub fn start(&mut self, now: u64) {
        self.next = Some(now.saturating_add(self.period));
    }

    /// Stops the interval.
    pub fn stop(&mut self) {
        self.next = None;
    }

    /// Returns `true` while the interval is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the next tick, if running.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.next
    }

    /// Returns `true` and schedules the following tick if a tick is due.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.next {
            Some(next) if next <= now => {
                // A zero period would fire on every call; keep at least 1ms.
                self.next = Some(now.saturating_add(self.period.max(1)));
                true
            }
            _ => false,
        }
    }
}
