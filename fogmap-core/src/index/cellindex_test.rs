//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{OverlaySettings, RevealStrategy};
use crate::core::error::OverlayError;
use crate::core::geom::{GeoExtent, LatLng};
use crate::index::CellIndex;
use crate::projection::{web_mercator_pixel, Projection, Projector};
use fog_grid::{CellShape, Point};

struct TestProjection {
    world_px: f64,
}

impl Projection for TestProjection {
    fn world_pixel_width(&self) -> f64 {
        self.world_px
    }
    fn to_screen_pixel(&self, pos: &LatLng) -> Point {
        web_mercator_pixel(pos, self.world_px)
    }
}

fn settings(shape: CellShape) -> OverlaySettings {
    OverlaySettings {
        cell_shape: shape,
        cell_diameter_m: 100.0,
        reveal: RevealStrategy::Radius,
        reveal_radius_px: 150.0,
    }
}

fn bounds_lat37() -> GeoExtent {
    GeoExtent::from_corners(LatLng::new(37.005, -122.99), LatLng::new(36.995, -123.01))
}

fn projector() -> Projector<TestProjection> {
    // zoom 15 with 256px tiles
    Projector::new(TestProjection {
        world_px: 256.0 * 2f64.powi(15),
    })
}

#[test]
fn test_hexagon_generation() {
    let projector = projector();
    let index = CellIndex::generate(&settings(CellShape::Hexagon), &projector, &bounds_lat37())
        .unwrap();
    assert!(!index.is_empty());

    // hexRadius = 50 * pixelsPerMeter at the viewport center latitude
    let ppm = projector.pixels_per_meter(37.0);
    let radius = 50.0 * ppm;

    // anchors on one row are spaced radius*sqrt(3) apart
    let first = &index.cells()[0];
    let next = index
        .cells()
        .iter()
        .find(|c| c.id.row == first.id.row && c.id.col == first.id.col + 1)
        .unwrap();
    assert!((next.anchor.x - first.anchor.x - radius * 3f64.sqrt()).abs() < 1e-9);
    assert_eq!(next.anchor.y, first.anchor.y);

    // boundary vertices sit on the hexagon circumradius
    for vertex in &first.boundary {
        assert!((vertex.distance(&first.anchor) - radius).abs() < 1e-9);
    }
}

#[test]
fn test_generation_is_deterministic() {
    let projector = projector();
    let settings = settings(CellShape::Hexagon);
    let bounds = bounds_lat37();
    let first = CellIndex::generate(&settings, &projector, &bounds).unwrap();
    let second = CellIndex::generate(&settings, &projector, &bounds).unwrap();
    assert_eq!(first.len(), second.len());
    for (a, b) in first.cells().iter().zip(second.cells().iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.anchor, b.anchor);
    }
}

#[test]
fn test_anchor_self_containment() {
    let projector = projector();
    for shape in [CellShape::Hexagon, CellShape::Square].iter() {
        let index = CellIndex::generate(&settings(*shape), &projector, &bounds_lat37()).unwrap();
        for cell in index.cells() {
            let hit = index.cell_containing(&cell.anchor).unwrap();
            assert_eq!(hit.id, cell.id);
        }
    }
}

#[test]
fn test_containment_miss() {
    let projector = projector();
    let index =
        CellIndex::generate(&settings(CellShape::Square), &projector, &bounds_lat37()).unwrap();
    // far outside the generated region
    assert!(index.cell_containing(&Point::new(-1e9, -1e9)).is_none());
}

#[test]
fn test_ungenerable_at_pole() {
    let projector = projector();
    let polar = GeoExtent::from_corners(LatLng::new(90.0, 10.0), LatLng::new(90.0, 9.99));
    assert_eq!(
        CellIndex::generate(&settings(CellShape::Hexagon), &projector, &polar).err(),
        Some(OverlayError::UngenerableGrid)
    );
}

#[test]
fn test_ungenerable_projection() {
    // degenerate external projection reports a non-finite world width
    let projector = Projector::new(TestProjection {
        world_px: f64::NAN,
    });
    assert_eq!(
        CellIndex::generate(&settings(CellShape::Hexagon), &projector, &bounds_lat37()).err(),
        Some(OverlayError::UngenerableGrid)
    );
}
