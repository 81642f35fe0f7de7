//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Position stream filtering and subscription lifecycle

use crate::map::{PositionSource, WatchId};
use fogmap_core::core::geom::LatLng;

/// Wraps the external position stream: filters out insignificant
/// movements and owns the single watch subscription handle.
pub struct PositionTracker {
    threshold_deg: f64,
    last: Option<LatLng>,
    watch: Option<WatchId>,
}

impl PositionTracker {
    pub fn new(threshold_deg: f64) -> PositionTracker {
        PositionTracker {
            threshold_deg,
            last: None,
            watch: None,
        }
    }
    pub fn last(&self) -> Option<&LatLng> {
        self.last.as_ref()
    }
    pub fn is_tracking(&self) -> bool {
        self.watch.is_some()
    }
    /// Accept or discard a position update. The first update is always
    /// accepted; later ones only when they exceed the movement
    /// threshold on at least one axis.
    pub fn accept(&mut self, pos: LatLng) -> bool {
        let significant = match self.last {
            Some(last) => pos.moved_beyond(&last, self.threshold_deg),
            None => true,
        };
        if significant {
            self.last = Some(pos);
        } else {
            debug!(
                "Discarding insignificant movement to {}/{}",
                pos.lat, pos.lng
            );
        }
        significant
    }
    /// Start continuous tracking. A no-op when already tracking, so a
    /// second start never produces duplicate callbacks.
    pub fn start_tracking(&mut self, source: &mut dyn PositionSource) -> Result<bool, String> {
        if self.watch.is_some() {
            debug!("Already tracking, keeping existing subscription");
            return Ok(false);
        }
        let watch = source.watch_position()?;
        self.watch = Some(watch);
        Ok(true)
    }
    /// Cancel the subscription exactly once and clear the handle
    pub fn stop_tracking(&mut self, source: &mut dyn PositionSource) -> bool {
        match self.watch.take() {
            Some(watch) => {
                source.clear_watch(watch);
                true
            }
            None => false,
        }
    }
}
