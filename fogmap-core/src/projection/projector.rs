//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Geographic to pixel coordinate conversion

use crate::core::geom::{GeoExtent, LatLng};
use fog_grid::{Extent, Point};
use std::f64::consts;

/// WGS84 equatorial circumference approximation
pub const EARTH_CIRCUMFERENCE_M: f64 = 40075016.686;

/// Projection provided by the external map engine.
///
/// The pixel plane is expected to be continuous with an origin that is
/// fixed while the zoom level stays constant. Cell identity is derived
/// from lattice coordinates in this plane.
pub trait Projection {
    /// Width of the full projected world at the current zoom, in pixels
    fn world_pixel_width(&self) -> f64;
    /// Project a geographic position into the pixel plane
    fn to_screen_pixel(&self, pos: &LatLng) -> Point;
}

/// Standard web-mercator pixel mapping for a world of `world_pixel_width`
/// pixels. Hosts without a native projection (tests, simulators) can use
/// this as their `Projection::to_screen_pixel` implementation.
pub fn web_mercator_pixel(pos: &LatLng, world_pixel_width: f64) -> Point {
    let x = (pos.lng + 180.0) / 360.0 * world_pixel_width;
    let lat_rad = pos.lat.to_radians();
    let y = (1.0 - (consts::PI / 4.0 + lat_rad / 2.0).tan().ln() / consts::PI) / 2.0
        * world_pixel_width;
    Point::new(x, y)
}

/// Scale and conversion helper on top of an external projection
pub struct Projector<P: Projection> {
    projection: P,
}

impl<P: Projection> Projector<P> {
    pub fn new(projection: P) -> Projector<P> {
        Projector { projection }
    }
    pub fn world_pixel_width(&self) -> f64 {
        self.projection.world_pixel_width()
    }
    /// Local scale at the given latitude
    pub fn pixels_per_meter(&self, latitude: f64) -> f64 {
        self.projection.world_pixel_width()
            / (EARTH_CIRCUMFERENCE_M * latitude.to_radians().cos())
    }
    pub fn to_screen_pixel(&self, pos: &LatLng) -> Point {
        self.projection.to_screen_pixel(pos)
    }
    /// Pixel extent of a geographic extent. North latitudes map to
    /// smaller y values (y axis points down).
    pub fn pixel_extent(&self, bounds: &GeoExtent) -> Extent {
        let top_left = self.to_screen_pixel(&bounds.north_west());
        let bottom_right = self.to_screen_pixel(&bounds.south_east());
        Extent {
            minx: top_left.x,
            miny: top_left.y,
            maxx: bottom_right.x,
            maxy: bottom_right.y,
        }
    }
}
