//! Hit-testing: which annotation, or which resize handle, is under a point.
//!
//! Annotations are tested topmost-first (reverse paint order), so the last
//! one drawn wins ties. When exactly one annotation is selected its resize
//! handles are checked before any body, because handles can sit inside the
//! shape's own hit region.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{Annotation, AnnotationId, AnnotationKind};
use crate::geom::{self, Point};

/// Resize handle identifier, in clockwise order starting at angle 0 (east).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
    Top,
    TopRight,
}

impl Handle {
    /// All handles, clockwise from angle 0.
    pub const ALL: [Handle; 8] = [
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
    ];

    /// The four corner handles.
    pub const CORNERS: [Handle; 4] = [Handle::BottomRight, Handle::BottomLeft, Handle::TopLeft, Handle::TopRight];

    /// The handle diametrically across.
    #[must_use]
    pub fn opposite(self) -> Handle {
        match self {
            Self::Right => Self::Left,
            Self::BottomRight => Self::TopLeft,
            Self::Bottom => Self::Top,
            Self::BottomLeft => Self::TopRight,
            Self::Left => Self::Right,
            Self::TopLeft => Self::BottomRight,
            Self::Top => Self::Bottom,
            Self::TopRight => Self::BottomLeft,
        }
    }

    /// Perimeter angle in radians (y grows downward, so clockwise on screen).
    #[must_use]
    pub fn angle(self) -> f64 {
        let step: u8 = match self {
            Self::Right => 0,
            Self::BottomRight => 1,
            Self::Bottom => 2,
            Self::BottomLeft => 3,
            Self::Left => 4,
            Self::TopLeft => 5,
            Self::Top => 6,
            Self::TopRight => 7,
        };
        std::f64::consts::FRAC_PI_4 * f64::from(step)
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Right | Self::Left => "ew-resize",
            Self::Top | Self::Bottom => "ns-resize",
            Self::BottomRight | Self::TopLeft => "nwse-resize",
            Self::BottomLeft | Self::TopRight => "nesw-resize",
        }
    }

    /// Whether dragging this handle changes the x extent.
    #[must_use]
    pub fn moves_x(self) -> bool {
        !matches!(self, Self::Top | Self::Bottom)
    }

    /// Whether dragging this handle changes the y extent.
    #[must_use]
    pub fn moves_y(self) -> bool {
        !matches!(self, Self::Left | Self::Right)
    }

    /// Signed unit offset of this handle from a box center: `(-1|0|1, -1|0|1)`.
    #[must_use]
    pub fn unit(self) -> (f64, f64) {
        match self {
            Self::Right => (1.0, 0.0),
            Self::BottomRight => (1.0, 1.0),
            Self::Bottom => (0.0, 1.0),
            Self::BottomLeft => (-1.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::TopLeft => (-1.0, -1.0),
            Self::Top => (0.0, -1.0),
            Self::TopRight => (1.0, -1.0),
        }
    }
}

/// Which part of an annotation was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(Handle),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub annotation_id: AnnotationId,
    pub part: HitPart,
}

/// Topmost annotation whose shape contains `point`, or `None`.
///
/// `buffer_floor` is the smallest stroke buffer any outline gets.
#[must_use]
pub fn hit_test(point: Point, annotations: &[Annotation], scale: f64, buffer_floor: f64) -> Option<&Annotation> {
    annotations
        .iter()
        .rev()
        .find(|a| geom::point_in_shape(point, a, scale, buffer_floor))
}

/// Handles that may be dragged on `annotation` in its current shape state.
#[must_use]
pub fn valid_handles(annotation: &Annotation) -> Vec<Handle> {
    match annotation.kind {
        kind if kind.is_line_like() => {
            let [a, b, ..] = annotation.points.as_slice() else {
                return Vec::new();
            };
            vec![endpoint_handle(*a, *b), endpoint_handle(*b, *a)]
        }
        kind if kind.is_stamp() => Handle::CORNERS.to_vec(),
        _ if annotation.points.is_empty() => Vec::new(),
        _ => Handle::ALL.to_vec(),
    }
}

/// Corner handle that coincides with endpoint `p` of a segment whose other end is `other`.
#[must_use]
pub fn endpoint_handle(p: Point, other: Point) -> Handle {
    match (p.x <= other.x, p.y <= other.y) {
        (true, true) => Handle::TopLeft,
        (false, true) => Handle::TopRight,
        (true, false) => Handle::BottomLeft,
        (false, false) => Handle::BottomRight,
    }
}

/// Position of `handle` on `annotation`.
///
/// Circles place handles on the perimeter at 45° steps; every other type
/// uses the corners and edge midpoints of its bounding box.
#[must_use]
pub fn handle_position(annotation: &Annotation, handle: Handle) -> Point {
    if annotation.kind == AnnotationKind::Circle {
        if let Some((c, r)) = geom::circle_geometry(annotation) {
            return circle_handle_position(c, r, handle);
        }
    }
    box_handle_position(&geom::shape_bounds(annotation), handle)
}

/// Perimeter point of a circle for `handle`.
#[must_use]
pub fn circle_handle_position(center: Point, radius: f64, handle: Handle) -> Point {
    let angle = handle.angle();
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Corner or edge midpoint of `b` for `handle`.
#[must_use]
pub fn box_handle_position(b: &geom::Bounds, handle: Handle) -> Point {
    let c = b.center();
    let (ux, uy) = handle.unit();
    Point::new(c.x + ux * b.width() * 0.5, c.y + uy * b.height() * 0.5)
}

/// Valid handles of `annotation` paired with their positions.
#[must_use]
pub fn handle_positions(annotation: &Annotation) -> Vec<(Handle, Point)> {
    valid_handles(annotation)
        .into_iter()
        .map(|h| (h, handle_position(annotation, h)))
        .collect()
}

/// Resize handle of `annotation` under `point`, if any.
///
/// `tolerance_px` is in device pixels and shrinks with zoom. Circle handles
/// use a radial test; box handles use a square test. When tolerance zones
/// overlap on a small shape, the nearest handle wins.
#[must_use]
pub fn hit_resize_handle(point: Point, annotation: &Annotation, scale: f64, tolerance_px: f64) -> Option<Handle> {
    let tol = tolerance_px / scale;
    let circle = annotation.kind == AnnotationKind::Circle;
    handle_positions(annotation)
        .into_iter()
        .filter(|(_, pos)| {
            if circle {
                point.distance_to(*pos) <= tol
            } else {
                (point.x - pos.x).abs() <= tol && (point.y - pos.y).abs() <= tol
            }
        })
        .min_by(|(_, a), (_, b)| point.distance_to(*a).total_cmp(&point.distance_to(*b)))
        .map(|(h, _)| h)
}

/// Full select-tool hit test: handles of a single selection first, then bodies.
#[must_use]
pub fn hit_test_with_selection(
    point: Point,
    annotations: &[Annotation],
    selected: &[AnnotationId],
    scale: f64,
    tolerance_px: f64,
    buffer_floor: f64,
) -> Option<Hit> {
    if let [only] = selected {
        if let Some(ann) = annotations.iter().find(|a| &a.id == only) {
            if let Some(handle) = hit_resize_handle(point, ann, scale, tolerance_px) {
                return Some(Hit { annotation_id: ann.id, part: HitPart::Handle(handle) });
            }
        }
    }
    hit_test(point, annotations, scale, buffer_floor).map(|a| Hit { annotation_id: a.id, part: HitPart::Body })
}
