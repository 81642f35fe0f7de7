//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Viewport cell index

use crate::core::config::OverlaySettings;
use crate::core::error::OverlayError;
use crate::core::geom::GeoExtent;
use crate::projection::{Projection, Projector};
use fog_grid::geometry::point_in_polygon;
use fog_grid::{CellId, CellShape, Lattice, LatticeIterator, Point};

/// One overlay cell. Built fresh on every grid regeneration and never
/// mutated; only its id outlives the regeneration.
#[derive(Clone, Debug)]
pub struct Cell {
    pub id: CellId,
    /// Center point in the projection pixel plane
    pub anchor: Point,
    /// Boundary vertices used for hit testing
    pub boundary: Vec<Point>,
}

/// All cells covering the current viewport, in lattice iteration order
pub struct CellIndex {
    cells: Vec<Cell>,
}

impl CellIndex {
    pub fn new(cells: Vec<Cell>) -> CellIndex {
        CellIndex { cells }
    }
    pub fn empty() -> CellIndex {
        CellIndex { cells: Vec::new() }
    }
    /// Tile the viewport bounds with cells sized to the configured
    /// real-world diameter.
    ///
    /// The cell size in pixels is recomputed from the scale at the
    /// current viewport center latitude on every call.
    pub fn generate<P: Projection>(
        settings: &OverlaySettings,
        projector: &Projector<P>,
        bounds: &GeoExtent,
    ) -> Result<CellIndex, OverlayError> {
        let center = bounds.center();
        let ppm = projector.pixels_per_meter(center.lat);
        if center.lat.abs() >= 90.0 || !ppm.is_finite() || ppm <= 0.0 {
            warn!(
                "Ungenerable grid: pixels_per_meter {} at latitude {}",
                ppm, center.lat
            );
            return Err(OverlayError::UngenerableGrid);
        }
        let size = match settings.cell_shape {
            CellShape::Hexagon => settings.cell_diameter_m / 2.0 * ppm,
            CellShape::Square => settings.cell_diameter_m * ppm,
        };
        let lattice = Lattice::new(settings.cell_shape, size);
        let extent = projector.pixel_extent(bounds);
        let limits = lattice
            .cell_limits(&extent)
            .ok_or(OverlayError::UngenerableGrid)?;
        let cells = LatticeIterator::new(limits)
            .map(|id| Cell {
                id,
                anchor: lattice.anchor(&id),
                boundary: lattice.boundary(&id),
            })
            .collect::<Vec<_>>();
        debug!(
            "Generated {} {} cells of {}px for {:?}",
            cells.len(),
            settings.cell_shape.as_str(),
            size,
            extent
        );
        Ok(CellIndex::new(cells))
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    /// First cell in index order containing the pixel point, if any
    pub fn cell_containing(&self, p: &Point) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|cell| point_in_polygon(p, &cell.boundary))
    }
}
