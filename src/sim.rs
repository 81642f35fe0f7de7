//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Headless map host playing back a recorded position trace

use fog_grid::Point;
use fogmap_core::core::config::ApplicationCfg;
use fogmap_core::core::geom::{GeoExtent, LatLng};
use fogmap_core::projection::{web_mercator_pixel, Projection};
use fogmap_service::map::{MapProvider, PositionSource, WatchId};
use fogmap_service::surface::SvgSurface;
use fogmap_service::OverlayService;
use serde_json::Value;
use std::f64::consts::PI;
use std::fs::File;
use std::thread;
use std::time::{Duration, Instant};

const TILE_SIZE: f64 = 256.0;
const SIM_ZOOM: u8 = 15;
const VIEWPORT_W: f64 = 640.0;
const VIEWPORT_H: f64 = 480.0;

fn world_pixel_width(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(i32::from(zoom))
}

/// Inverse web mercator: pixel-plane position back to lat/lng
fn unproject(x: f64, y: f64, world_px: f64) -> LatLng {
    let lng = x / world_px * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / world_px);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Map stand-in with a fixed viewport size around a movable center
struct SimMap {
    center: LatLng,
    zoom: u8,
}

impl MapProvider for SimMap {
    fn bounds(&self) -> Option<GeoExtent> {
        let world_px = world_pixel_width(self.zoom);
        let center_px = web_mercator_pixel(&self.center, world_px);
        let nw = unproject(
            center_px.x - VIEWPORT_W / 2.0,
            center_px.y - VIEWPORT_H / 2.0,
            world_px,
        );
        let se = unproject(
            center_px.x + VIEWPORT_W / 2.0,
            center_px.y + VIEWPORT_H / 2.0,
            world_px,
        );
        Some(GeoExtent::from_corners(
            LatLng::new(nw.lat, se.lng),
            LatLng::new(se.lat, nw.lng),
        ))
    }
    fn center(&self) -> Option<LatLng> {
        Some(self.center)
    }
    fn zoom(&self) -> Option<u8> {
        Some(self.zoom)
    }
    fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }
}

struct SimProjection {
    world_px: f64,
}

impl Projection for SimProjection {
    fn world_pixel_width(&self) -> f64 {
        self.world_px
    }
    fn to_screen_pixel(&self, pos: &LatLng) -> Point {
        web_mercator_pixel(pos, self.world_px)
    }
}

#[derive(Default)]
struct SimPositions;

impl PositionSource for SimPositions {
    fn watch_position(&mut self) -> Result<WatchId, String> {
        debug!("Position watch started");
        Ok(WatchId(1))
    }
    fn clear_watch(&mut self, id: WatchId) {
        debug!("Position watch {:?} cleared", id);
    }
}

fn read_trace(path: &str) -> Result<Vec<LatLng>, String> {
    let file =
        File::open(path).map_err(|e| format!("Could not open trace file {} - {}", path, e))?;
    let json: Value =
        serde_json::from_reader(file).map_err(|e| format!("Invalid trace file {} - {}", path, e))?;
    let entries = json
        .as_array()
        .ok_or_else(|| format!("Trace file {} must contain a JSON array", path))?;
    entries
        .iter()
        .map(|entry| {
            let lat = entry["lat"]
                .as_f64()
                .ok_or_else(|| "Trace entry without 'lat'".to_string())?;
            let lng = entry["lng"]
                .as_f64()
                .ok_or_else(|| "Trace entry without 'lng'".to_string())?;
            Ok(LatLng::new(lat, lng))
        })
        .collect()
}

/// Feed a trace through the overlay service and write the final view
/// as SVG
pub fn run(config: &ApplicationCfg, trace_path: &str, out_path: &str) -> Result<(), String> {
    let trace = read_trace(trace_path)?;
    let start = *trace.first().ok_or("Empty position trace")?;
    info!("Playing back {} positions from {}", trace.len(), trace_path);

    let map = SimMap {
        center: start,
        zoom: SIM_ZOOM,
    };
    let surface = SvgSurface::new(VIEWPORT_W, VIEWPORT_H);
    let mut service = OverlayService::from_config(config, map, surface)?;
    service.on_map_ready(
        SimProjection {
            world_px: world_pixel_width(SIM_ZOOM),
        },
        Instant::now(),
    );

    let mut source = SimPositions::default();
    service.start_tracking(&mut source);

    // wait out the debounce window after each recentering pan
    let quiescence = Duration::from_millis(config.redraw.debounce_ms + 50);
    for pos in trace {
        service.on_position(pos);
        service.on_viewport_changed(Instant::now());
        thread::sleep(quiescence);
        service.tick(Instant::now());
    }

    service.stop_tracking(&mut source);
    info!("Revealed {} cells", service.reveals().len());
    service
        .surface()
        .write(out_path)
        .map_err(|e| format!("Error writing {} - {}", out_path, e))?;
    println!("Overlay written to {}", out_path);
    Ok(())
}
