//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Pixel-space geometry primitives and hit testing

/// Point in pixel coordinates (y axis pointing down)
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Pixel extent
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
    pub fn is_finite(&self) -> bool {
        self.minx.is_finite() && self.miny.is_finite() && self.maxx.is_finite() && self.maxy.is_finite()
    }
}

/// Ray casting point-in-polygon test.
///
/// `polygon` is an ordered vertex sequence without a closing point.
pub fn point_in_polygon(p: &Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (&polygon[i], &polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Distance from a point to the segment `a`-`b`
pub fn point_segment_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).max(0.0).min(1.0);
    let foot = Point::new(a.x + t * dx, a.y + t * dy);
    p.distance(&foot)
}

/// True if the polygon intersects the circle around `p`, i.e. `p` lies
/// inside the polygon or some boundary edge passes within `radius` of `p`.
pub fn polygon_intersects_circle(polygon: &[Point], p: &Point, radius: f64) -> bool {
    if point_in_polygon(p, polygon) {
        return true;
    }
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        if point_segment_distance(p, &polygon[j], &polygon[i]) <= radius {
            return true;
        }
        j = i;
    }
    false
}

#[test]
fn test_point_in_polygon() {
    let square = vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ];
    assert!(point_in_polygon(&Point::new(5.0, 5.0), &square));
    assert!(point_in_polygon(&Point::new(0.1, 9.9), &square));
    assert!(!point_in_polygon(&Point::new(-0.1, 5.0), &square));
    assert!(!point_in_polygon(&Point::new(5.0, 10.1), &square));
    // degenerate polygons contain nothing
    assert!(!point_in_polygon(&Point::new(0.0, 0.0), &[]));
    assert!(!point_in_polygon(
        &Point::new(0.0, 0.0),
        &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]
    ));
}

#[test]
fn test_segment_distance() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    assert_eq!(point_segment_distance(&Point::new(5.0, 3.0), &a, &b), 3.0);
    assert_eq!(point_segment_distance(&Point::new(-4.0, 0.0), &a, &b), 4.0);
    assert_eq!(point_segment_distance(&Point::new(13.0, 4.0), &a, &b), 5.0);
    // zero-length segment
    assert_eq!(point_segment_distance(&Point::new(3.0, 4.0), &a, &a), 5.0);
}

#[test]
fn test_circle_intersection() {
    let square = vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ];
    assert!(polygon_intersects_circle(&square, &Point::new(5.0, 5.0), 0.0));
    assert!(polygon_intersects_circle(&square, &Point::new(15.0, 5.0), 5.0));
    assert!(!polygon_intersects_circle(&square, &Point::new(15.0, 5.0), 4.9));
}
