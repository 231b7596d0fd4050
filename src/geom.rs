//! Geometry kernel: points, bounds, containment, and segment intersection.
//!
//! Everything here is a pure function of its arguments. The hit tester and
//! the selection manager build on these predicates; the renderer reuses the
//! outline helpers so what is drawn matches what is hit.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{FRAC_PI_5, GEOM_EPSILON, STAR_INNER_RATIO};
use crate::doc::{Annotation, AnnotationKind, CircleMode};

/// A point in document space (or viewport space, depending on context).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Scale both components by `k`.
    #[must_use]
    pub fn scaled(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounding box. `top < bottom` in document space (y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Box spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self { left: a.x.min(b.x), right: a.x.max(b.x), top: a.y.min(b.y), bottom: a.y.max(b.y) }
    }

    /// Box with top-left `origin` and the given size.
    #[must_use]
    pub fn from_origin_size(origin: Point, width: f64, height: f64) -> Self {
        Self::from_corners(origin, Point::new(origin.x + width, origin.y + height))
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// Inclusive containment.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Whether `other` lies entirely inside `self` (inclusive).
    #[must_use]
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.left >= self.left && other.right <= self.right && other.top >= self.top && other.bottom <= self.bottom
    }

    /// Grow the box by `d` on every side.
    #[must_use]
    pub fn expand(&self, d: f64) -> Bounds {
        Bounds { left: self.left - d, right: self.right + d, top: self.top - d, bottom: self.bottom + d }
    }

    /// Corners in clockwise order starting top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }

    /// The four edges as segments, clockwise from the top edge.
    #[must_use]
    pub fn edges(&self) -> [(Point, Point); 4] {
        let [tl, tr, br, bl] = self.corners();
        [(tl, tr), (tr, br), (br, bl), (bl, tl)]
    }
}

/// Axis-aligned box over all `points`. An empty slice yields a zero box at the origin.
#[must_use]
pub fn bounds(points: &[Point]) -> Bounds {
    let Some(first) = points.first() else {
        return Bounds::default();
    };
    points.iter().skip(1).fold(
        Bounds { left: first.x, right: first.x, top: first.y, bottom: first.y },
        |b, p| Bounds {
            left: b.left.min(p.x),
            right: b.right.max(p.x),
            top: b.top.min(p.y),
            bottom: b.bottom.max(p.y),
        },
    )
}

/// Center and radius of a circle annotation, honoring its mode flag.
///
/// Returns `None` when the annotation has fewer than two points.
#[must_use]
pub fn circle_geometry(annotation: &Annotation) -> Option<(Point, f64)> {
    let [a, b, ..] = annotation.points.as_slice() else {
        return None;
    };
    Some(match annotation.style.circle_mode {
        CircleMode::CenterRadius => (*a, a.distance_to(*b)),
        CircleMode::Diameter => (a.midpoint(*b), a.distance_to(*b) * 0.5),
    })
}

/// Box occupied by an anchored (single-point) annotation: text, sticky note, or stamp.
#[must_use]
pub fn anchored_box(annotation: &Annotation) -> Bounds {
    let anchor = annotation.anchor();
    let (w, h) = annotation.box_size();
    Bounds::from_origin_size(anchor, w, h)
}

/// Band covered by a highlight: the two-point box, at least one stroke tall.
#[must_use]
pub fn highlight_box(annotation: &Annotation) -> Bounds {
    let b = bounds(&annotation.points);
    let min_h = annotation.style.stroke_width;
    if b.height() >= min_h {
        return b;
    }
    let cy = b.center().y;
    Bounds { top: cy - min_h * 0.5, bottom: cy + min_h * 0.5, ..b }
}

/// Visual extent of an annotation, dispatching on its type.
#[must_use]
pub fn shape_bounds(annotation: &Annotation) -> Bounds {
    match annotation.kind {
        AnnotationKind::Circle => match circle_geometry(annotation) {
            Some((c, r)) => Bounds { left: c.x - r, right: c.x + r, top: c.y - r, bottom: c.y + r },
            None => bounds(&annotation.points),
        },
        AnnotationKind::Highlight => highlight_box(annotation),
        kind if kind.is_anchored() => anchored_box(annotation),
        _ => bounds(&annotation.points),
    }
}

/// Whether `point` (document space) lies on `annotation` at the given zoom `scale`.
#[must_use]
pub fn point_in_shape(point: Point, annotation: &Annotation, scale: f64, buffer_floor: f64) -> bool {
    let buffer = annotation.style.stroke_width.max(buffer_floor) / scale;
    match annotation.kind {
        AnnotationKind::Highlight => highlight_box(annotation).contains(point),
        AnnotationKind::Circle => {
            circle_geometry(annotation).is_some_and(|(c, r)| point.distance_to(c) <= r + buffer)
        }
        kind if kind.is_stamp() => anchored_box(annotation).contains(point),
        kind if kind.is_text_like() => anchored_box(annotation).contains(point),
        _ => bounds(&annotation.points).expand(buffer).contains(point),
    }
}

/// Parametric segment intersection with the `ua, ub ∈ [0, 1]` inclusion test.
///
/// Parallel and collinear segments report `false`, even when they overlap.
#[must_use]
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let denom = (b2.y - b1.y) * (a2.x - a1.x) - (b2.x - b1.x) * (a2.y - a1.y);
    if denom.abs() < GEOM_EPSILON {
        return false;
    }
    let ua = ((b2.x - b1.x) * (a1.y - b1.y) - (b2.y - b1.y) * (a1.x - b1.x)) / denom;
    let ub = ((a2.x - a1.x) * (a1.y - b1.y) - (a2.y - a1.y) * (a1.x - b1.x)) / denom;
    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}

// =============================================================
// Outline helpers (shared with the renderer)
// =============================================================

/// Ten alternating outer/inner vertices of a five-point star inscribed in `b`.
#[must_use]
#[allow(clippy::similar_names)]
pub fn star_vertices(b: &Bounds) -> [Point; 10] {
    let c = b.center();
    let rx_outer = b.width() / 2.0;
    let ry_outer = b.height() / 2.0;
    let offset = std::f64::consts::FRAC_PI_2;
    std::array::from_fn(|i| {
        #[allow(clippy::cast_precision_loss)]
        let angle = FRAC_PI_5.mul_add(i as f64, -offset);
        let (rx, ry) = if i % 2 == 0 {
            (rx_outer, ry_outer)
        } else {
            (rx_outer * STAR_INNER_RATIO, ry_outer * STAR_INNER_RATIO)
        };
        Point::new(c.x + rx * angle.cos(), c.y + ry * angle.sin())
    })
}

/// Isosceles triangle inscribed in `b`: apex at top center, base along the bottom edge.
#[must_use]
pub fn triangle_vertices(b: &Bounds) -> [Point; 3] {
    [
        Point::new(b.center().x, b.top),
        Point::new(b.right, b.bottom),
        Point::new(b.left, b.bottom),
    ]
}

/// Tip and both barbs of an arrowhead pointing from `tail` to `tip`.
#[must_use]
pub fn arrowhead_points(tail: Point, tip: Point, size: f64) -> [Point; 3] {
    let spread = std::f64::consts::PI / 6.0;
    let angle = (tip.y - tail.y).atan2(tip.x - tail.x);
    [
        tip,
        Point::new(tip.x - size * (angle - spread).cos(), tip.y - size * (angle - spread).sin()),
        Point::new(tip.x - size * (angle + spread).cos(), tip.y - size * (angle + spread).sin()),
    ]
}
