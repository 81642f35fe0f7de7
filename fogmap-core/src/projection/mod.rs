//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

mod projector;

pub use self::projector::{web_mercator_pixel, Projection, Projector, EARTH_CIRCUMFERENCE_M};
