//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! External collaborator contracts: map engine and position source

use fogmap_core::core::geom::{GeoExtent, LatLng};

/// Read access to the external map widget. All getters return `None`
/// while the map is not fully initialized.
pub trait MapProvider {
    fn bounds(&self) -> Option<GeoExtent>;
    fn center(&self) -> Option<LatLng>;
    fn zoom(&self) -> Option<u8>;
    fn set_center(&mut self, center: LatLng);
}

/// Handle of a continuous position subscription
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct WatchId(pub u64);

/// Geolocation backend. Position updates and errors are delivered by
/// the host through `OverlayService::on_position` and
/// `OverlayService::on_position_error`; this trait only manages the
/// subscription resource.
pub trait PositionSource {
    /// Subscribe to continuous position updates
    fn watch_position(&mut self) -> Result<WatchId, String>;
    /// Cancel a subscription
    fn clear_watch(&mut self, id: WatchId);
}
