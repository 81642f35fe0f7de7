//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::map::{MapProvider, PositionSource, WatchId};
use crate::overlay_service::OverlayService;
use crate::surface::{CellSprite, RenderSurface};
use fog_grid::Point;
use fogmap_core::core::config::{parse_config, ApplicationCfg, RevealStrategy, DEFAULT_CONFIG};
use fogmap_core::core::geom::{GeoExtent, LatLng};
use fogmap_core::projection::{web_mercator_pixel, Projection};
use std::time::{Duration, Instant};

struct TestMap {
    center: LatLng,
    lat_span: f64,
    lng_span: f64,
}

impl TestMap {
    fn at(center: LatLng) -> TestMap {
        TestMap {
            center,
            lat_span: 0.01,
            lng_span: 0.02,
        }
    }
}

impl MapProvider for TestMap {
    fn bounds(&self) -> Option<GeoExtent> {
        Some(GeoExtent::from_corners(
            LatLng::new(
                self.center.lat + self.lat_span / 2.0,
                self.center.lng + self.lng_span / 2.0,
            ),
            LatLng::new(
                self.center.lat - self.lat_span / 2.0,
                self.center.lng - self.lng_span / 2.0,
            ),
        ))
    }
    fn center(&self) -> Option<LatLng> {
        Some(self.center)
    }
    fn zoom(&self) -> Option<u8> {
        Some(15)
    }
    fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }
}

struct TestProjection {
    world_px: f64,
}

impl TestProjection {
    fn zoom15() -> TestProjection {
        TestProjection {
            world_px: 256.0 * 2f64.powi(15),
        }
    }
}

impl Projection for TestProjection {
    fn world_pixel_width(&self) -> f64 {
        self.world_px
    }
    fn to_screen_pixel(&self, pos: &LatLng) -> Point {
        web_mercator_pixel(pos, self.world_px)
    }
}

#[derive(Default)]
struct RecordingSurface {
    renders: Vec<Vec<CellSprite>>,
    markers: Vec<Point>,
    statuses: Vec<String>,
}

impl RenderSurface for RecordingSurface {
    fn render(&mut self, cells: &[CellSprite]) {
        self.renders.push(cells.to_vec());
    }
    fn move_marker(&mut self, pos: Point) {
        self.markers.push(pos);
    }
    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }
}

#[derive(Default)]
struct TestPositions {
    next_id: u64,
    active: Vec<WatchId>,
    cleared: Vec<WatchId>,
    fail: bool,
}

impl PositionSource for TestPositions {
    fn watch_position(&mut self) -> Result<WatchId, String> {
        if self.fail {
            return Err("Geolocation not supported".to_string());
        }
        self.next_id += 1;
        let id = WatchId(self.next_id);
        self.active.push(id);
        Ok(id)
    }
    fn clear_watch(&mut self, id: WatchId) {
        self.active.retain(|w| *w != id);
        self.cleared.push(id);
    }
}

fn app_cfg() -> ApplicationCfg {
    parse_config(DEFAULT_CONFIG.to_string(), "").unwrap()
}

fn service(
    cfg: &ApplicationCfg,
    center: LatLng,
) -> OverlayService<TestMap, TestProjection, RecordingSurface> {
    OverlayService::from_config(cfg, TestMap::at(center), RecordingSurface::default()).unwrap()
}

const CENTER: LatLng = LatLng { lat: 37.0, lng: -122.0 };

#[test]
fn test_initial_redraw() {
    let mut service = service(&app_cfg(), CENTER);
    assert!(service.index().is_none());

    service.on_map_ready(TestProjection::zoom15(), Instant::now());
    assert_eq!(service.surface().renders.len(), 1);
    let index = service.index().unwrap();
    assert!(!index.is_empty());
    assert_eq!(service.surface().renders[0].len(), index.len());
    // nothing revealed yet
    assert!(service.surface().renders[0].iter().all(|s| !s.revealed));
}

#[test]
fn test_debounce_coalesces_viewport_changes() {
    let mut service = service(&app_cfg(), CENTER);
    let t0 = Instant::now();
    service.on_map_ready(TestProjection::zoom15(), t0);
    assert_eq!(service.surface().renders.len(), 1);

    // continuous pan: 5 events 10ms apart
    for i in 0..5u64 {
        service.on_viewport_changed(t0 + Duration::from_millis(i * 10));
    }
    // quiescence window counts from the last event (t0+40)
    assert!(!service.tick(t0 + Duration::from_millis(200)));
    assert_eq!(service.surface().renders.len(), 1);
    assert!(service.tick(t0 + Duration::from_millis(240)));
    assert_eq!(service.surface().renders.len(), 2);
    // fired once, not queued
    assert!(!service.tick(t0 + Duration::from_millis(500)));
    assert_eq!(service.surface().renders.len(), 2);
}

#[test]
fn test_position_reveals_and_moves_marker() {
    let mut service = service(&app_cfg(), CENTER);
    service.on_map_ready(TestProjection::zoom15(), Instant::now());

    service.on_position(CENTER);
    assert_eq!(service.surface().markers.len(), 1);
    // radius strategy with 150px over ~13px hexagons reveals a patch
    assert!(service.reveals().len() > 1);
    let last = service.surface().renders.last().unwrap();
    assert_eq!(
        last.iter().filter(|s| s.revealed).count(),
        service.reveals().len()
    );
}

#[test]
fn test_point_strategy_reveals_single_cell() {
    let mut cfg = app_cfg();
    cfg.overlay.reveal = "point".to_string();
    let mut service = service(&cfg, CENTER);
    assert_eq!(service.settings().reveal, RevealStrategy::Point);
    service.on_map_ready(TestProjection::zoom15(), Instant::now());

    service.on_position(CENTER);
    assert_eq!(service.reveals().len(), 1);
}

#[test]
fn test_movement_threshold_filters_jitter() {
    let mut service = service(&app_cfg(), CENTER);
    service.on_map_ready(TestProjection::zoom15(), Instant::now());

    service.on_position(LatLng::new(37.0, -122.0));
    let markers = service.surface().markers.len();
    let revealed = service.reveals().len();

    // below threshold on both axes: no marker move, no reveal query
    service.on_position(LatLng::new(37.0005, -122.0005));
    assert_eq!(service.surface().markers.len(), markers);
    assert_eq!(service.reveals().len(), revealed);

    // at threshold on one axis: both fire
    service.on_position(LatLng::new(37.001, -122.0005));
    assert_eq!(service.surface().markers.len(), markers + 1);
    // accepted update recentered the map
    assert_eq!(service.map().center(), Some(LatLng::new(37.001, -122.0005)));
}

#[test]
fn test_reveal_persists_across_regeneration() {
    let mut service = service(&app_cfg(), CENTER);
    let t0 = Instant::now();
    service.on_map_ready(TestProjection::zoom15(), t0);

    service.on_position(CENTER);
    let revealed_before = service.reveals().len();
    assert!(revealed_before > 0);

    // regenerate with identical parameters
    service.on_viewport_changed(t0);
    assert!(service.tick(t0 + Duration::from_millis(250)));

    assert_eq!(service.reveals().len(), revealed_before);
    let last = service.surface().renders.last().unwrap();
    assert_eq!(
        last.iter().filter(|s| s.revealed).count(),
        revealed_before
    );
}

#[test]
fn test_clear_unreveals_everything() {
    let mut service = service(&app_cfg(), CENTER);
    service.on_map_ready(TestProjection::zoom15(), Instant::now());

    let ids = service.index().unwrap().cells()[..5]
        .iter()
        .map(|c| c.id)
        .collect::<Vec<_>>();
    for id in ids {
        service.on_cell_clicked(id);
    }
    assert_eq!(service.reveals().len(), 5);

    service.reset_exploration();
    assert!(service.reveals().is_empty());
    let last = service.surface().renders.last().unwrap();
    assert!(last.iter().all(|s| !s.revealed));
}

#[test]
fn test_exploring_mode_gates_reveals() {
    let mut service = service(&app_cfg(), CENTER);
    service.on_map_ready(TestProjection::zoom15(), Instant::now());
    service.set_exploring(false);

    service.on_position(CENTER);
    // marker still moves, but nothing is revealed
    assert_eq!(service.surface().markers.len(), 1);
    assert!(service.reveals().is_empty());
}

#[test]
fn test_ungenerable_grid_recovers() {
    // viewport centered exactly on the pole
    let mut service = service(&app_cfg(), LatLng::new(90.0, 0.0));
    let t0 = Instant::now();
    service.on_map_ready(TestProjection::zoom15(), t0);

    assert_eq!(service.index().unwrap().len(), 0);
    assert!(service
        .surface()
        .statuses
        .iter()
        .any(|s| s.contains("ungenerable")));

    // next valid viewport event recovers
    service.map_mut().set_center(CENTER);
    service.on_viewport_changed(t0);
    assert!(service.tick(t0 + Duration::from_millis(250)));
    assert!(!service.index().unwrap().is_empty());
}

#[test]
fn test_events_before_map_ready() {
    let mut service = service(&app_cfg(), CENTER);
    let t0 = Instant::now();

    // no projection yet: everything no-ops instead of failing
    service.on_position(CENTER);
    assert_eq!(service.surface().markers.len(), 0);
    assert!(service.reveals().is_empty());

    service.on_viewport_changed(t0);
    service.tick(t0 + Duration::from_millis(250));
    assert_eq!(service.surface().renders.len(), 0);
    assert!(service.index().is_none());
}

#[test]
fn test_watch_lifecycle() {
    let mut service = service(&app_cfg(), CENTER);
    service.on_map_ready(TestProjection::zoom15(), Instant::now());
    let mut source = TestPositions::default();

    service.start_tracking(&mut source);
    assert!(service.is_tracking());
    assert_eq!(source.active.len(), 1);

    // starting again keeps the existing subscription
    service.start_tracking(&mut source);
    assert_eq!(source.active.len(), 1);

    // source error: reported, subscription cancelled exactly once
    service.on_position_error("User denied Geolocation", &mut source);
    assert!(!service.is_tracking());
    assert!(source.active.is_empty());
    assert_eq!(source.cleared.len(), 1);
    assert!(service
        .surface()
        .statuses
        .iter()
        .any(|s| s.contains("User denied Geolocation")));

    // a second error does not clear twice
    service.on_position_error("timeout", &mut source);
    assert_eq!(source.cleared.len(), 1);
}

#[test]
fn test_failing_position_source() {
    let mut service = service(&app_cfg(), CENTER);
    service.on_map_ready(TestProjection::zoom15(), Instant::now());
    let mut source = TestPositions {
        fail: true,
        ..TestPositions::default()
    };

    service.start_tracking(&mut source);
    assert!(!service.is_tracking());
    assert!(service
        .surface()
        .statuses
        .iter()
        .any(|s| s.contains("Geolocation not supported")));
}

#[test]
fn test_teardown_cancels_pending_redraw() {
    let mut service = service(&app_cfg(), CENTER);
    let t0 = Instant::now();
    service.on_map_ready(TestProjection::zoom15(), t0);
    service.on_viewport_changed(t0);
    service.teardown();
    assert!(!service.tick(t0 + Duration::from_millis(500)));
    assert!(service.index().is_none());
}
