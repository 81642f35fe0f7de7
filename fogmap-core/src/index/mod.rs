//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

mod cellindex;

pub use self::cellindex::{Cell, CellIndex};

#[cfg(test)]
mod cellindex_test;
