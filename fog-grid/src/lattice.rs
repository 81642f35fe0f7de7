//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Cell lattices

use crate::geometry::{Extent, Point};
use std::fmt;

/// Overlay cell shape
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum CellShape {
    /// Pointy-top hexagon
    Hexagon,
    Square,
}

impl CellShape {
    pub fn from_str(val: &str) -> Result<CellShape, String> {
        match val {
            "hexagon" => Ok(CellShape::Hexagon),
            "square" => Ok(CellShape::Square),
            _ => Err(format!("Unexpected enum value '{}'", val)),
        }
    }
    pub fn as_str(&self) -> &'static str {
        match *self {
            CellShape::Hexagon => "hexagon",
            CellShape::Square => "square",
        }
    }
}

/// Lattice coordinate of a cell, relative to the pixel-plane origin.
///
/// Identifiers derived from lattice coordinates stay stable when the
/// viewport pans or resizes. A zoom change rescales the pixel plane,
/// so identifiers are only comparable within one zoom level.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct CellId {
    pub col: i32,
    pub row: i32,
}

impl CellId {
    pub fn new(col: i32, row: i32) -> CellId {
        CellId { col, row }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.col, self.row)
    }
}

/// Min and max lattice coordinates (inclusive)
#[derive(PartialEq, Clone, Debug)]
pub struct CellLimits {
    pub mincol: i32,
    pub minrow: i32,
    pub maxcol: i32,
    pub maxrow: i32,
}

/// Regular cell lattice anchored at the pixel-plane origin
#[derive(Clone, Debug)]
pub struct Lattice {
    shape: CellShape,
    /// Circumradius for hexagons, side length for squares, in pixels
    size: f64,
}

impl Lattice {
    pub fn new(shape: CellShape, size: f64) -> Lattice {
        Lattice { shape, size }
    }
    pub fn shape(&self) -> CellShape {
        self.shape
    }
    pub fn size(&self) -> f64 {
        self.size
    }
    /// Horizontal anchor spacing within a row
    pub fn horizontal_pitch(&self) -> f64 {
        match self.shape {
            CellShape::Hexagon => self.size * 3f64.sqrt(),
            CellShape::Square => self.size,
        }
    }
    /// Vertical spacing between rows
    pub fn vertical_pitch(&self) -> f64 {
        match self.shape {
            CellShape::Hexagon => self.size * 1.5,
            CellShape::Square => self.size,
        }
    }
    /// Anchor (center) point of a cell. Odd hexagon rows are shifted by
    /// half the horizontal pitch, which yields an edge-to-edge tiling.
    pub fn anchor(&self, id: &CellId) -> Point {
        let mut x = id.col as f64 * self.horizontal_pitch();
        let y = id.row as f64 * self.vertical_pitch();
        if self.shape == CellShape::Hexagon && id.row.rem_euclid(2) == 1 {
            x += self.horizontal_pitch() / 2.0;
        }
        Point::new(x, y)
    }
    /// Boundary vertices of a cell, ordered, without closing point
    pub fn boundary(&self, id: &CellId) -> Vec<Point> {
        let anchor = self.anchor(id);
        match self.shape {
            CellShape::Hexagon => (0..6)
                .map(|k| {
                    let angle = (60.0 * k as f64 + 30.0).to_radians();
                    Point::new(
                        anchor.x + self.size * angle.cos(),
                        anchor.y + self.size * angle.sin(),
                    )
                })
                .collect(),
            CellShape::Square => {
                let h = self.size / 2.0;
                vec![
                    Point::new(anchor.x - h, anchor.y - h),
                    Point::new(anchor.x + h, anchor.y - h),
                    Point::new(anchor.x + h, anchor.y + h),
                    Point::new(anchor.x - h, anchor.y + h),
                ]
            }
        }
    }
    /// Lattice coordinates covering `extent` with a one-cell margin.
    ///
    /// Returns `None` for degenerate input (zero or non-finite cell size,
    /// non-finite extent, coordinates beyond lattice range) instead of
    /// producing a runaway coordinate range.
    pub fn cell_limits(&self, extent: &Extent) -> Option<CellLimits> {
        if !self.size.is_finite() || self.size <= 0.0 || !extent.is_finite() {
            return None;
        }
        let hp = self.horizontal_pitch();
        let vp = self.vertical_pitch();
        let mincol = (extent.minx / hp).floor() - 1.0;
        let maxcol = (extent.maxx / hp).ceil() + 1.0;
        let minrow = (extent.miny / vp).floor() - 1.0;
        let maxrow = (extent.maxy / vp).ceil() + 1.0;
        for val in [mincol, maxcol, minrow, maxrow].iter() {
            if val.abs() > i32::MAX as f64 {
                return None;
            }
        }
        Some(CellLimits {
            mincol: mincol as i32,
            minrow: minrow as i32,
            maxcol: maxcol as i32,
            maxrow: maxrow as i32,
        })
    }
}

/// Row-major iterator over the cells of a lattice range
pub struct LatticeIterator {
    col: i32,
    row: i32,
    limits: CellLimits,
    finished: bool,
}

impl LatticeIterator {
    pub fn new(limits: CellLimits) -> LatticeIterator {
        let finished = limits.mincol > limits.maxcol || limits.minrow > limits.maxrow;
        LatticeIterator {
            col: limits.mincol,
            row: limits.minrow,
            limits,
            finished,
        }
    }
}

impl Iterator for LatticeIterator {
    type Item = CellId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = CellId::new(self.col, self.row);
        if self.col < self.limits.maxcol {
            self.col += 1;
        } else if self.row < self.limits.maxrow {
            self.col = self.limits.mincol;
            self.row += 1;
        } else {
            self.finished = true;
        }
        Some(current)
    }
}

#[test]
fn test_iterator_order() {
    let limits = CellLimits {
        mincol: -1,
        minrow: 0,
        maxcol: 1,
        maxrow: 1,
    };
    let cells = LatticeIterator::new(limits).collect::<Vec<_>>();
    assert_eq!(
        cells,
        vec![
            CellId::new(-1, 0),
            CellId::new(0, 0),
            CellId::new(1, 0),
            CellId::new(-1, 1),
            CellId::new(0, 1),
            CellId::new(1, 1),
        ]
    );
}

#[test]
fn test_empty_iterator() {
    let limits = CellLimits {
        mincol: 2,
        minrow: 0,
        maxcol: 1,
        maxrow: 5,
    };
    let cells = LatticeIterator::new(limits).collect::<Vec<_>>();
    assert_eq!(cells, vec![]);
}
