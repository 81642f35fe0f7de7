//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Geographic types

/// Geographic position in degrees
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> LatLng {
        LatLng { lat, lng }
    }
    /// True if either axis differs from `other` by `threshold_deg` or more.
    /// Used to suppress jitter from noisy position sensors.
    ///
    /// The boundary is inclusive: subtracting degree values loses a few
    /// ulps, so a delta of exactly `threshold_deg` still counts as moved.
    pub fn moved_beyond(&self, other: &LatLng, threshold_deg: f64) -> bool {
        const EPSILON: f64 = 1e-12;
        (self.lat - other.lat).abs() >= threshold_deg - EPSILON
            || (self.lng - other.lng).abs() >= threshold_deg - EPSILON
    }
}

/// Geographic extent spanned by northeast/southwest viewport corners
#[derive(PartialEq, Clone, Debug)]
pub struct GeoExtent {
    pub minlng: f64,
    pub minlat: f64,
    pub maxlng: f64,
    pub maxlat: f64,
}

impl GeoExtent {
    pub fn from_corners(ne: LatLng, sw: LatLng) -> GeoExtent {
        GeoExtent {
            minlng: sw.lng,
            minlat: sw.lat,
            maxlng: ne.lng,
            maxlat: ne.lat,
        }
    }
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.minlat + self.maxlat) / 2.0,
            (self.minlng + self.maxlng) / 2.0,
        )
    }
    /// Top-left viewport corner
    pub fn north_west(&self) -> LatLng {
        LatLng::new(self.maxlat, self.minlng)
    }
    /// Bottom-right viewport corner
    pub fn south_east(&self) -> LatLng {
        LatLng::new(self.minlat, self.maxlng)
    }
}
