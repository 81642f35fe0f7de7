//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Overlay error conditions. All of them are local and recoverable;
//! none should terminate the application.

use std::error::Error;
use std::fmt;

#[derive(PartialEq, Clone, Debug)]
pub enum OverlayError {
    /// Projection or drawing surface not initialized yet.
    /// Retried implicitly on the next event.
    NotReady,
    /// Degenerate projection input, e.g. latitude out of the mercator
    /// domain. Results in an empty grid for one redraw.
    UngenerableGrid,
    /// Geolocation denied, unsupported or timed out
    PositionUnavailable(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OverlayError::NotReady => write!(f, "Map projection not ready"),
            OverlayError::UngenerableGrid => write!(f, "Grid ungenerable for current viewport"),
            OverlayError::PositionUnavailable(msg) => write!(f, "Position unavailable: {}", msg),
        }
    }
}

impl Error for OverlayError {}
