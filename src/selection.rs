//! Selection & resize manager.
//!
//! Owns the ordered selection set and the three geometry edits applied to it:
//! rubber-band membership, per-handle resize, and multi-object translation.
//! Resize never errors; a handle that is not valid for the annotation's
//! current shape yields `None` and the caller keeps the old geometry.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::consts::GEOM_EPSILON;
use crate::doc::{Annotation, AnnotationId, AnnotationKind, CircleMode, PageAnnotations};
use crate::geom::{self, Bounds, Point};
use crate::hit::{self, Handle};

/// Ordered set of selected annotation ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<AnnotationId>,
}

impl Selection {
    #[must_use]
    pub fn ids(&self) -> &[AnnotationId] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, id: &AnnotationId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected id when exactly one annotation is selected.
    #[must_use]
    pub fn single(&self) -> Option<AnnotationId> {
        match self.ids.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Replace the selection, dropping duplicates. Returns whether it changed.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = AnnotationId>) -> bool {
        let mut next: Vec<AnnotationId> = Vec::new();
        for id in ids {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        if next == self.ids {
            return false;
        }
        self.ids = next;
        true
    }

    /// Select exactly `id`. Returns whether the selection changed.
    pub fn set_single(&mut self, id: AnnotationId) -> bool {
        self.replace([id])
    }

    /// Remove `id` if present. Returns whether it was selected.
    pub fn remove(&mut self, id: &AnnotationId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|x| x != id);
        before != self.ids.len()
    }

    /// Clear the selection. Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.ids.is_empty();
        self.ids.clear();
        changed
    }
}

// =============================================================
// Rubber-band membership
// =============================================================

/// Whether `annotation` is captured by the rubber band `band`.
///
/// Text and sticky notes need their center inside the band; stamps need their
/// whole box inside; everything else is captured when any bounding-box corner
/// lies inside the band or any bounding-box edge crosses a band edge.
#[must_use]
pub fn band_selects(annotation: &Annotation, band: &Bounds) -> bool {
    let kind = annotation.kind;
    if kind.is_text_like() {
        return band.contains(geom::anchored_box(annotation).center());
    }
    if kind.is_stamp() {
        return band.contains_bounds(&geom::anchored_box(annotation));
    }
    let b = geom::shape_bounds(annotation);
    if b.corners().iter().any(|c| band.contains(*c)) {
        return true;
    }
    b.edges().iter().any(|(s1, s2)| {
        band.edges()
            .iter()
            .any(|(e1, e2)| geom::segments_intersect(*s1, *s2, *e1, *e2))
    })
}

/// Ids of every annotation captured by `band`, in paint order.
#[must_use]
pub fn select_in_band(annotations: &[Annotation], band: &Bounds) -> Vec<AnnotationId> {
    annotations
        .iter()
        .filter(|a| band_selects(a, band))
        .map(|a| a.id)
        .collect()
}

// =============================================================
// Move
// =============================================================

/// Translate every selected annotation by the same `delta` in one pass.
///
/// Returns the updated annotations in selection order. Ids missing from the
/// page are skipped.
pub fn translate_selected(page: &mut PageAnnotations, ids: &[AnnotationId], delta: Point) -> Vec<Annotation> {
    let mut updated = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(ann) = page.get_mut(id) {
            ann.translate(delta);
            updated.push(ann.clone());
        }
    }
    updated
}

// =============================================================
// Resize
// =============================================================

/// Geometry of `original` after dragging `handle` to `point`.
///
/// The opposite handle stays fixed. `uniform` scales circles about their
/// center and is ignored by every other type. Returns `None` when `handle`
/// is not valid for the annotation's current shape.
#[must_use]
pub fn resize(original: &Annotation, handle: Handle, point: Point, uniform: bool) -> Option<Annotation> {
    if !hit::valid_handles(original).contains(&handle) {
        return None;
    }
    let mut next = original.clone();
    match original.kind {
        AnnotationKind::Circle => resize_circle(&mut next, handle, point, uniform)?,
        kind if kind.is_line_like() => resize_line(&mut next, handle, point),
        kind if kind.is_anchored() => {
            let n = resized_bounds(&geom::anchored_box(original), handle, point);
            next.points = vec![Point::new(n.left, n.top)];
            next.width = Some(n.width());
            next.height = Some(n.height());
        }
        AnnotationKind::Freehand => {
            let old = geom::bounds(&original.points);
            let anchor = hit::box_handle_position(&old, handle.opposite());
            let dragged = hit::box_handle_position(&old, handle);
            let target = Point::new(
                if handle.moves_x() { point.x } else { dragged.x },
                if handle.moves_y() { point.y } else { dragged.y },
            );
            next.points = original
                .points
                .iter()
                .map(|p| {
                    Point::new(
                        remap(p.x, anchor.x, dragged.x, target.x),
                        remap(p.y, anchor.y, dragged.y, target.y),
                    )
                })
                .collect();
        }
        _ => {
            let n = resized_bounds(&geom::bounds(&original.points), handle, point);
            next.points = vec![Point::new(n.left, n.top), Point::new(n.right, n.bottom)];
        }
    }
    Some(next)
}

/// New box after dragging `handle` of `b` to `point`, opposite side fixed.
/// Edge handles only move their own axis.
#[must_use]
pub fn resized_bounds(b: &Bounds, handle: Handle, point: Point) -> Bounds {
    let anchor = hit::box_handle_position(b, handle.opposite());
    let (x1, x2) = if handle.moves_x() { (anchor.x, point.x) } else { (b.left, b.right) };
    let (y1, y2) = if handle.moves_y() { (anchor.y, point.y) } else { (b.top, b.bottom) };
    Bounds::from_corners(Point::new(x1, y1), Point::new(x2, y2))
}

/// Map `v` from the span `[fixed, from]` onto `[fixed, to]`. A zero span only shifts.
fn remap(v: f64, fixed: f64, from: f64, to: f64) -> f64 {
    let span = from - fixed;
    if span.abs() < GEOM_EPSILON {
        return v + (to - from);
    }
    fixed + (v - fixed) * (to - fixed) / span
}

fn resize_line(next: &mut Annotation, handle: Handle, point: Point) {
    let [a, b, ..] = next.points.as_mut_slice() else {
        return;
    };
    if hit::endpoint_handle(*a, *b) == handle {
        *a = point;
    } else {
        *b = point;
    }
}

fn resize_circle(next: &mut Annotation, handle: Handle, point: Point, uniform: bool) -> Option<()> {
    let (center, radius) = geom::circle_geometry(next)?;
    let [a, b, ..] = next.points.as_slice() else {
        return None;
    };
    let axis = unit_or_x(*b - *a);
    if uniform {
        let r = point.distance_to(center);
        next.points = match next.style.circle_mode {
            CircleMode::CenterRadius => vec![center, center + axis.scaled(r)],
            CircleMode::Diameter => vec![center - axis.scaled(r), center + axis.scaled(r)],
        };
        return Some(());
    }
    let anchor = hit::circle_handle_position(center, radius, handle.opposite());
    next.points = match next.style.circle_mode {
        CircleMode::CenterRadius => vec![anchor.midpoint(point), point],
        CircleMode::Diameter => vec![anchor, point],
    };
    Some(())
}

fn unit_or_x(v: Point) -> Point {
    let len = v.x.hypot(v.y);
    if len < GEOM_EPSILON { Point::new(1.0, 0.0) } else { v.scaled(1.0 / len) }
}
