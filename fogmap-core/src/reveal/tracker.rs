//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Session-scoped reveal state

use crate::index::CellIndex;
use fog_grid::geometry::polygon_intersects_circle;
use fog_grid::{CellId, Point};
use std::collections::HashSet;

/// Set of revealed cell identifiers.
///
/// The set outlives grid regenerations: after a redraw the same ids are
/// matched against the new cell index. Ids without a matching cell are
/// kept and become effective again when a matching cell reappears.
pub struct RevealTracker {
    revealed: HashSet<CellId>,
}

impl RevealTracker {
    pub fn new() -> RevealTracker {
        RevealTracker {
            revealed: HashSet::new(),
        }
    }
    /// Mark a cell revealed. Idempotent; returns true if newly revealed.
    pub fn reveal(&mut self, id: CellId) -> bool {
        self.revealed.insert(id)
    }
    pub fn is_revealed(&self, id: &CellId) -> bool {
        self.revealed.contains(id)
    }
    /// Empties the set ("refresh exploration" action)
    pub fn clear(&mut self) {
        self.revealed.clear();
    }
    pub fn len(&self) -> usize {
        self.revealed.len()
    }
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }
    /// Point-based reveal: the single cell containing `p`, if any
    pub fn reveal_at(&mut self, p: &Point, index: &CellIndex) -> Option<CellId> {
        let id = index.cell_containing(p).map(|cell| cell.id)?;
        self.reveal(id);
        Some(id)
    }
    /// Radius-based reveal: every cell whose anchor lies within
    /// `radius_px` of `p` or whose boundary intersects that circle.
    /// Returns the newly revealed ids.
    pub fn reveal_near(&mut self, p: &Point, radius_px: f64, index: &CellIndex) -> Vec<CellId> {
        let mut new_ids = Vec::new();
        for cell in index.cells() {
            if self.is_revealed(&cell.id) {
                continue;
            }
            if cell.anchor.distance(p) <= radius_px
                || polygon_intersects_circle(&cell.boundary, p, radius_px)
            {
                self.revealed.insert(cell.id);
                new_ids.push(cell.id);
            }
        }
        new_ids
    }
}

impl Default for RevealTracker {
    fn default() -> Self {
        RevealTracker::new()
    }
}
