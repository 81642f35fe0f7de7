//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Fog-of-war overlay application context

use crate::map::{MapProvider, PositionSource};
use crate::position::PositionTracker;
use crate::redraw::RedrawController;
use crate::surface::{CellSprite, RenderSurface};
use fog_grid::{CellId, Point};
use fogmap_core::core::config::{ApplicationCfg, OverlaySettings, RevealStrategy, TrackingCfg};
use fogmap_core::core::error::OverlayError;
use fogmap_core::core::geom::LatLng;
use fogmap_core::core::Config;
use fogmap_core::index::CellIndex;
use fogmap_core::projection::{Projection, Projector};
use fogmap_core::reveal::RevealTracker;
use std::time::{Duration, Instant};

/// Owns the overlay state and reacts to host events.
///
/// Created on map-ready, torn down with the view. All methods run on
/// the host's event thread and leave the state consistent on return.
pub struct OverlayService<M: MapProvider, P: Projection, S: RenderSurface> {
    settings: OverlaySettings,
    tracking: TrackingCfg,
    map: M,
    surface: S,
    projector: Option<Projector<P>>,
    index: Option<CellIndex>,
    reveals: RevealTracker,
    position: PositionTracker,
    redraw: RedrawController,
    exploring: bool,
}

impl<M: MapProvider, P: Projection, S: RenderSurface> OverlayService<M, P, S> {
    pub fn from_config(cfg: &ApplicationCfg, map: M, surface: S) -> Result<Self, String> {
        let settings = OverlaySettings::from_config(&cfg.overlay)?;
        Ok(OverlayService {
            settings,
            tracking: cfg.tracking.clone(),
            map,
            surface,
            projector: None,
            index: None,
            reveals: RevealTracker::new(),
            position: PositionTracker::new(cfg.tracking.movement_threshold_deg),
            redraw: RedrawController::new(Duration::from_millis(cfg.redraw.debounce_ms)),
            exploring: true,
        })
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }
    pub fn index(&self) -> Option<&CellIndex> {
        self.index.as_ref()
    }
    pub fn reveals(&self) -> &RevealTracker {
        &self.reveals
    }
    pub fn is_exploring(&self) -> bool {
        self.exploring
    }
    pub fn is_tracking(&self) -> bool {
        self.position.is_tracking()
    }
    pub fn map(&self) -> &M {
        &self.map
    }
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Map idle listener, fires once after initial load
    pub fn on_map_ready(&mut self, projection: P, now: Instant) {
        self.projector = Some(Projector::new(projection));
        self.surface.status("Map ready");
        self.redraw_now(now);
    }

    /// Viewport-change event (pan/zoom/resize). Coalesced; the actual
    /// regeneration happens in `tick` after the quiescence window.
    pub fn on_viewport_changed(&mut self, now: Instant) {
        self.redraw.request(now);
    }

    /// Timer pulse from the host event loop
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.redraw.due(now) {
            self.redraw_now(now);
            true
        } else {
            false
        }
    }

    /// Position update from the external stream
    pub fn on_position(&mut self, pos: LatLng) {
        if !self.position.accept(pos) {
            return;
        }
        debug!("Position update {}/{}", pos.lat, pos.lng);
        if self.tracking.recenter {
            // the host map fires a viewport-change event in response
            self.map.set_center(pos);
        }
        if self.exploring {
            self.reveal_at_position(&pos);
        }
        self.render();
    }

    /// Position source failure: report, stop tracking, keep the view
    pub fn on_position_error(&mut self, message: &str, source: &mut dyn PositionSource) {
        let err = OverlayError::PositionUnavailable(message.to_string());
        error!("{}", err);
        self.surface.status(&err.to_string());
        if self.position.stop_tracking(source) {
            info!("Position tracking stopped");
        }
    }

    pub fn start_tracking(&mut self, source: &mut dyn PositionSource) {
        match self.position.start_tracking(source) {
            Ok(true) => info!("Position tracking started"),
            Ok(false) => {}
            Err(msg) => {
                let err = OverlayError::PositionUnavailable(msg);
                error!("{}", err);
                self.surface.status(&err.to_string());
            }
        }
    }

    pub fn stop_tracking(&mut self, source: &mut dyn PositionSource) {
        if self.position.stop_tracking(source) {
            info!("Position tracking stopped");
        }
    }

    /// Manual tap/click reveal
    pub fn on_cell_clicked(&mut self, id: CellId) {
        self.reveals.reveal(id);
        self.surface.status(&format!("Cell revealed: {}", id));
        self.render();
    }

    /// "Refresh exploration" action: forget all revealed cells
    pub fn reset_exploration(&mut self) {
        self.reveals.clear();
        self.surface.status("Exploration reset");
        self.render();
    }

    pub fn set_exploring(&mut self, exploring: bool) {
        self.exploring = exploring;
    }

    /// View teardown: drop scheduled work
    pub fn teardown(&mut self) {
        self.redraw.cancel();
        self.index = None;
    }

    fn reveal_at_position(&mut self, pos: &LatLng) -> bool {
        let projector = match &self.projector {
            Some(projector) => projector,
            None => {
                debug!("Reveal skipped: {}", OverlayError::NotReady);
                return false;
            }
        };
        let index = match &self.index {
            Some(index) => index,
            None => return false,
        };
        let px = projector.to_screen_pixel(pos);
        match self.settings.reveal {
            RevealStrategy::Radius => !self
                .reveals
                .reveal_near(&px, self.settings.reveal_radius_px, index)
                .is_empty(),
            RevealStrategy::Point => self.reveals.reveal_at(&px, index).is_some(),
        }
    }

    /// Discard the cell index, regenerate it for the current viewport,
    /// reapply reveal state and render.
    fn redraw_now(&mut self, now: Instant) {
        self.redraw.begin();
        match self.generate_index() {
            Ok(index) => {
                self.index = Some(index);
                self.render();
            }
            Err(OverlayError::UngenerableGrid) => {
                // empty grid for this redraw only, recovered on the
                // next valid viewport event
                self.index = Some(CellIndex::empty());
                self.surface.status(&OverlayError::UngenerableGrid.to_string());
                self.render();
            }
            Err(err) => {
                info!("Redraw skipped: {}", err);
            }
        }
        self.redraw.finish(now);
    }

    fn generate_index(&self) -> Result<CellIndex, OverlayError> {
        let projector = self.projector.as_ref().ok_or(OverlayError::NotReady)?;
        let bounds = self.map.bounds().ok_or(OverlayError::NotReady)?;
        CellIndex::generate(&self.settings, projector, &bounds)
    }

    /// Pixel-plane position of the viewport's top-left corner
    fn viewport_origin(&self) -> Option<Point> {
        let projector = self.projector.as_ref()?;
        let bounds = self.map.bounds()?;
        let extent = projector.pixel_extent(&bounds);
        Some(Point::new(extent.minx, extent.miny))
    }

    /// Push cells and marker to the surface in viewport-local pixels
    fn render(&mut self) {
        let origin = match self.viewport_origin() {
            Some(origin) => origin,
            None => {
                debug!("Render skipped: {}", OverlayError::NotReady);
                return;
            }
        };
        if let Some(index) = &self.index {
            let mut sprites = Vec::with_capacity(index.len());
            for cell in index.cells() {
                sprites.push(CellSprite {
                    id: cell.id,
                    boundary: cell
                        .boundary
                        .iter()
                        .map(|p| Point::new(p.x - origin.x, p.y - origin.y))
                        .collect(),
                    revealed: self.reveals.is_revealed(&cell.id),
                });
            }
            self.surface.render(&sprites);
        }
        if let Some(pos) = self.position.last() {
            if let Some(projector) = &self.projector {
                let px = projector.to_screen_pixel(pos);
                self.surface
                    .move_marker(Point::new(px.x - origin.x, px.y - origin.y));
            }
        }
    }
}
