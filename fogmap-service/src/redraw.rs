//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Redraw coalescing state machine

use crate::events::Debouncer;
use std::time::{Duration, Instant};

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum DrawState {
    Idle,
    Drawing,
}

/// Coalesces viewport-change events into single redraws.
///
/// Rapid successive events only restart the debounce window; requests
/// arriving while a redraw is in progress are collapsed into one
/// trailing redraw.
pub struct RedrawController {
    state: DrawState,
    debouncer: Debouncer,
    pending: bool,
}

impl RedrawController {
    pub fn new(debounce: Duration) -> RedrawController {
        RedrawController {
            state: DrawState::Idle,
            debouncer: Debouncer::new(debounce),
            pending: false,
        }
    }
    pub fn state(&self) -> DrawState {
        self.state
    }
    pub fn has_pending(&self) -> bool {
        self.pending || self.debouncer.is_pending()
    }
    /// Viewport-change event
    pub fn request(&mut self, now: Instant) {
        match self.state {
            DrawState::Idle => self.debouncer.trigger(now),
            DrawState::Drawing => self.pending = true,
        }
    }
    /// True if the quiescence window has elapsed and a redraw is due
    pub fn due(&mut self, now: Instant) -> bool {
        self.state == DrawState::Idle && self.debouncer.fire_if_due(now)
    }
    /// Idle -> Drawing
    pub fn begin(&mut self) {
        self.state = DrawState::Drawing;
    }
    /// Drawing -> Idle; a request received while drawing restarts the
    /// debounce window for one trailing redraw
    pub fn finish(&mut self, now: Instant) {
        self.state = DrawState::Idle;
        if self.pending {
            self.pending = false;
            self.debouncer.trigger(now);
        }
    }
    /// Drop any scheduled redraw (view teardown)
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
        self.pending = false;
        self.state = DrawState::Idle;
    }
}
