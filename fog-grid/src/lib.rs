//! A library for fog-of-war cell lattice calculations
//!
//! ## Lattices
//!
//! ```rust
//! use fog_grid::{CellShape, Extent, Lattice, LatticeIterator};
//!
//! let lattice = Lattice::new(CellShape::Hexagon, 20.0);
//! let limits = lattice
//!     .cell_limits(&Extent {
//!         minx: 0.0,
//!         miny: 0.0,
//!         maxx: 100.0,
//!         maxy: 100.0,
//!     })
//!     .unwrap();
//! for id in LatticeIterator::new(limits) {
//!     let boundary = lattice.boundary(&id);
//!     assert_eq!(boundary.len(), 6);
//! }
//! ```
//!
//! ## Hit testing
//!
//! ```rust
//! use fog_grid::geometry::point_in_polygon;
//! use fog_grid::{CellId, CellShape, Lattice};
//!
//! let lattice = Lattice::new(CellShape::Square, 10.0);
//! let id = CellId::new(3, -2);
//! assert!(point_in_polygon(&lattice.anchor(&id), &lattice.boundary(&id)));
//! ```

pub mod geometry;
mod lattice;

pub use geometry::{Extent, Point};
pub use lattice::{CellId, CellLimits, CellShape, Lattice, LatticeIterator};
