//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Rendering surface contract and built-in surfaces

use fog_grid::{CellId, Point};
use std::fs::File;
use std::io::{self, Write};

/// One polygon handed to the rendering surface, in viewport-local
/// pixel coordinates
#[derive(Clone, Debug)]
pub struct CellSprite {
    pub id: CellId,
    pub boundary: Vec<Point>,
    pub revealed: bool,
}

pub trait RenderSurface {
    /// Replace all cell polygons (full redraw)
    fn render(&mut self, cells: &[CellSprite]);
    /// Place or move the user marker
    fn move_marker(&mut self, pos: Point);
    /// User-visible status message
    fn status(&mut self, message: &str);
}

/// Surface discarding all output
pub struct NullSurface;

impl RenderSurface for NullSurface {
    #[allow(unused_variables)]
    fn render(&mut self, cells: &[CellSprite]) {}
    #[allow(unused_variables)]
    fn move_marker(&mut self, pos: Point) {}
    fn status(&mut self, message: &str) {
        info!("Status: {}", message);
    }
}

/// Surface rendering the overlay into an SVG document
pub struct SvgSurface {
    width: f64,
    height: f64,
    cells: Vec<CellSprite>,
    marker: Option<Point>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> SvgSurface {
        SvgSurface {
            width,
            height,
            cells: Vec::new(),
            marker: None,
        }
    }
    pub fn to_svg(&self) -> String {
        let mut doc = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            self.width, self.height
        );
        doc.push('\n');
        for cell in &self.cells {
            let points = cell
                .boundary
                .iter()
                .map(|p| format!("{:.2},{:.2}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            let class = if cell.revealed {
                "cell revealed"
            } else {
                "cell"
            };
            let fill = if cell.revealed { "none" } else { "#222" };
            doc.push_str(&format!(
                r##"<polygon id="cell-{}-{}" class="{}" points="{}" fill="{}" stroke="#555"/>"##,
                cell.id.col, cell.id.row, class, points, fill
            ));
            doc.push('\n');
        }
        if let Some(marker) = &self.marker {
            doc.push_str(&format!(
                r##"<circle cx="{:.2}" cy="{:.2}" r="6" fill="#e33"/>"##,
                marker.x, marker.y
            ));
            doc.push('\n');
        }
        doc.push_str("</svg>\n");
        doc
    }
    pub fn write(&self, path: &str) -> Result<(), io::Error> {
        debug!("SvgSurface.write {}", path);
        let mut f = File::create(path)?;
        f.write_all(self.to_svg().as_bytes())
    }
}

impl RenderSurface for SvgSurface {
    fn render(&mut self, cells: &[CellSprite]) {
        self.cells = cells.to_vec();
    }
    fn move_marker(&mut self, pos: Point) {
        self.marker = Some(pos);
    }
    fn status(&mut self, message: &str) {
        info!("Status: {}", message);
    }
}
