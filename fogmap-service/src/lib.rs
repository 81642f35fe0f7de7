//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;

pub mod events;
pub mod map;
pub mod overlay_service;
pub mod position;
pub mod redraw;
pub mod surface;

pub use crate::overlay_service::OverlayService;

#[cfg(test)]
mod overlay_service_test;
