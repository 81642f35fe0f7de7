//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Timer primitives for event coalescing

use std::time::{Duration, Instant};

/// Coalesces rapid repeated triggers into a single delayed action.
///
/// At most one deadline is pending at any instant: triggering again
/// moves the deadline, it never queues a second action.
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Debouncer {
        Debouncer {
            delay,
            deadline: None,
        }
    }
    /// Start or restart the quiescence window
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
    /// Consume the deadline if it has elapsed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
