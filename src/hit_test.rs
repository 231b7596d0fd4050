#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::MIN_HIT_BUFFER;
use crate::doc::{CircleMode, Style};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn make(kind: AnnotationKind, points: Vec<Point>) -> Annotation {
    Annotation::new(kind, points, Style::default(), 1)
}

fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Annotation {
    make(AnnotationKind::Rectangle, vec![pt(x1, y1), pt(x2, y2)])
}

// =============================================================
// Handle
// =============================================================

#[test]
fn handle_opposites_pair_up() {
    for h in Handle::ALL {
        assert_eq!(h.opposite().opposite(), h);
        assert_ne!(h.opposite(), h);
    }
}

#[test]
fn handle_angles_step_by_quarter_pi() {
    for (i, h) in Handle::ALL.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let expected = std::f64::consts::FRAC_PI_4 * i as f64;
        assert!(approx_eq(h.angle(), expected), "{h:?}");
    }
}

#[test]
fn handle_cursors() {
    assert_eq!(Handle::Left.cursor(), "ew-resize");
    assert_eq!(Handle::Top.cursor(), "ns-resize");
    assert_eq!(Handle::TopLeft.cursor(), "nwse-resize");
    assert_eq!(Handle::TopRight.cursor(), "nesw-resize");
}

#[test]
fn edge_handles_move_one_axis() {
    assert!(Handle::Right.moves_x() && !Handle::Right.moves_y());
    assert!(Handle::Top.moves_y() && !Handle::Top.moves_x());
    assert!(Handle::BottomLeft.moves_x() && Handle::BottomLeft.moves_y());
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_test_empty_is_none() {
    assert!(hit_test(pt(0.0, 0.0), &[], 1.0, MIN_HIT_BUFFER).is_none());
}

#[test]
fn topmost_annotation_wins() {
    let below = rect(0.0, 0.0, 100.0, 100.0);
    let above = rect(50.0, 50.0, 150.0, 150.0);
    let anns = vec![below.clone(), above.clone()];
    assert_eq!(hit_test(pt(75.0, 75.0), &anns, 1.0, MIN_HIT_BUFFER).map(|a| a.id), Some(above.id));
    assert_eq!(hit_test(pt(20.0, 20.0), &anns, 1.0, MIN_HIT_BUFFER).map(|a| a.id), Some(below.id));
}

#[test]
fn hit_test_misses_outside_everything() {
    let anns = vec![rect(0.0, 0.0, 10.0, 10.0)];
    assert!(hit_test(pt(100.0, 100.0), &anns, 1.0, MIN_HIT_BUFFER).is_none());
}

// =============================================================
// valid_handles / positions
// =============================================================

#[test]
fn box_shapes_have_all_handles() {
    assert_eq!(valid_handles(&rect(0.0, 0.0, 10.0, 10.0)).len(), 8);
}

#[test]
fn stamps_have_corner_handles_only() {
    let s = make(AnnotationKind::StampRejected, vec![pt(0.0, 0.0)]);
    let handles = valid_handles(&s);
    assert_eq!(handles.len(), 4);
    assert!(handles.contains(&Handle::TopLeft));
    assert!(!handles.contains(&Handle::Top));
}

#[test]
fn line_handles_sit_on_endpoints() {
    let line = make(AnnotationKind::Line, vec![pt(10.0, 40.0), pt(50.0, 10.0)]);
    assert_eq!(valid_handles(&line), vec![Handle::BottomLeft, Handle::TopRight]);
    let positions = handle_positions(&line);
    assert_eq!(positions[0].1, pt(10.0, 40.0));
    assert_eq!(positions[1].1, pt(50.0, 10.0));
}

#[test]
fn annotation_without_points_has_no_handles() {
    assert!(valid_handles(&make(AnnotationKind::Freehand, vec![])).is_empty());
    assert!(valid_handles(&make(AnnotationKind::Arrow, vec![pt(1.0, 1.0)])).is_empty());
}

#[test]
fn box_handles_at_corners_and_midpoints() {
    let r = rect(10.0, 10.0, 50.0, 40.0);
    assert_eq!(handle_position(&r, Handle::TopLeft), pt(10.0, 10.0));
    assert_eq!(handle_position(&r, Handle::Bottom), pt(30.0, 40.0));
    assert_eq!(handle_position(&r, Handle::Right), pt(50.0, 25.0));
}

#[test]
fn circle_handles_are_on_the_perimeter() {
    let mut c = make(AnnotationKind::Circle, vec![pt(50.0, 50.0), pt(60.0, 50.0)]);
    c.style.circle_mode = CircleMode::CenterRadius;
    let center = pt(50.0, 50.0);
    let positions = handle_positions(&c);
    assert_eq!(positions.len(), 8);
    for (i, (_, p)) in positions.iter().enumerate() {
        assert!(approx_eq(p.distance_to(center), 10.0));
        let next = positions[(i + 1) % 8].1;
        let a0 = (p.y - center.y).atan2(p.x - center.x);
        let a1 = (next.y - center.y).atan2(next.x - center.x);
        let step = (a1 - a0).rem_euclid(std::f64::consts::TAU);
        assert!(approx_eq(step, std::f64::consts::FRAC_PI_4));
    }
    assert!(approx_eq(positions[0].1.x, 60.0));
    assert!(approx_eq(handle_position(&c, Handle::Bottom).y, 60.0));
}

// =============================================================
// Handle hit-testing
// =============================================================

#[test]
fn resize_handle_square_tolerance() {
    let r = rect(10.0, 10.0, 50.0, 40.0);
    assert_eq!(hit_resize_handle(pt(57.0, 47.0), &r, 1.0, 8.0), Some(Handle::BottomRight));
    assert_eq!(hit_resize_handle(pt(59.0, 40.0), &r, 1.0, 8.0), None);
}

#[test]
fn resize_handle_tolerance_shrinks_with_zoom() {
    let r = rect(10.0, 10.0, 50.0, 40.0);
    assert_eq!(hit_resize_handle(pt(55.0, 40.0), &r, 2.0, 8.0), None);
    assert_eq!(hit_resize_handle(pt(53.0, 40.0), &r, 2.0, 8.0), Some(Handle::BottomRight));
}

#[test]
fn small_shape_picks_nearest_handle() {
    let r = rect(0.0, 0.0, 10.0, 10.0);
    assert_eq!(hit_resize_handle(pt(10.0, 10.0), &r, 1.0, 8.0), Some(Handle::BottomRight));
    assert_eq!(hit_resize_handle(pt(0.0, 0.0), &r, 1.0, 8.0), Some(Handle::TopLeft));
    assert_eq!(hit_resize_handle(pt(11.0, 5.0), &r, 1.0, 8.0), Some(Handle::Right));
}

#[test]
fn circle_handle_tolerance_is_radial() {
    let c = make(AnnotationKind::Circle, vec![pt(0.0, 0.0), pt(100.0, 0.0)]);
    assert_eq!(hit_resize_handle(pt(105.0, 5.0), &c, 1.0, 8.0), Some(Handle::Right));
    assert_eq!(hit_resize_handle(pt(107.0, 7.0), &c, 1.0, 8.0), None);
}

#[test]
fn selected_handle_outside_body_is_hit() {
    let r = rect(10.0, 10.0, 50.0, 40.0);
    let anns = vec![r.clone()];
    let hit = hit_test_with_selection(pt(57.0, 47.0), &anns, &[r.id], 1.0, 8.0, MIN_HIT_BUFFER);
    assert_eq!(hit, Some(Hit { annotation_id: r.id, part: HitPart::Handle(Handle::BottomRight) }));
}

#[test]
fn unselected_handles_are_not_hit() {
    let r = rect(10.0, 10.0, 50.0, 40.0);
    assert_eq!(hit_test_with_selection(pt(57.0, 47.0), &[r], &[], 1.0, 8.0, MIN_HIT_BUFFER), None);
}

#[test]
fn multi_selection_hits_bodies_only() {
    let a = rect(10.0, 10.0, 50.0, 40.0);
    let b = rect(100.0, 100.0, 150.0, 150.0);
    let anns = vec![a.clone(), b.clone()];
    let hit = hit_test_with_selection(pt(50.0, 40.0), &anns, &[a.id, b.id], 1.0, 8.0, MIN_HIT_BUFFER);
    assert_eq!(hit, Some(Hit { annotation_id: a.id, part: HitPart::Body }));
}

#[test]
fn selected_handle_beats_body_above_it() {
    let lower = rect(10.0, 10.0, 50.0, 40.0);
    let upper = rect(40.0, 30.0, 90.0, 90.0);
    let anns = vec![lower.clone(), upper];
    let hit = hit_test_with_selection(pt(50.0, 40.0), &anns, &[lower.id], 1.0, 8.0, MIN_HIT_BUFFER);
    assert_eq!(hit, Some(Hit { annotation_id: lower.id, part: HitPart::Handle(Handle::BottomRight) }));
}
