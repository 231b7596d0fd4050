#![allow(clippy::float_cmp)]

use rand::Rng;

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn camera(scale: f64) -> Camera {
    Camera {
        scale,
        scroll: Point::default(),
        viewport_width: 400.0,
        viewport_height: 300.0,
        surface: Surface::uniform(1000.0, 1400.0),
    }
}

// =============================================================
// Surface
// =============================================================

#[test]
fn surface_default_ratio_is_one() {
    assert_eq!(Surface::default().ratio(), (1.0, 1.0));
}

#[test]
fn surface_hidpi_ratio() {
    let s = Surface { backing_width: 2000.0, backing_height: 1000.0, display_width: 1000.0, display_height: 1000.0 };
    assert_eq!(s.ratio(), (2.0, 1.0));
}

// =============================================================
// to_document_space
// =============================================================

#[test]
fn to_document_space_identity() {
    let cam = camera(1.0);
    let doc = cam.to_document_space(Point::new(50.0, 75.0), Point::default());
    assert!(point_approx_eq(doc, Point::new(50.0, 75.0)));
}

#[test]
fn to_document_space_divides_by_scale() {
    let cam = camera(4.0);
    let doc = cam.to_document_space(Point::new(40.0, 80.0), Point::default());
    assert!(point_approx_eq(doc, Point::new(10.0, 20.0)));
}

#[test]
fn to_document_space_applies_backing_ratio() {
    let mut cam = camera(2.0);
    cam.surface = Surface { backing_width: 2000.0, backing_height: 2800.0, display_width: 1000.0, display_height: 1400.0 };
    let doc = cam.to_document_space(Point::new(10.0, 10.0), Point::default());
    assert!(point_approx_eq(doc, Point::new(10.0, 10.0)));
}

#[test]
fn to_document_space_adds_drift() {
    let cam = camera(2.0);
    let doc = cam.to_document_space(Point::new(10.0, 10.0), Point::new(30.0, -6.0));
    assert!(point_approx_eq(doc, Point::new(20.0, 2.0)));
}

#[test]
fn round_trip_for_random_scales() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let cam = camera(rng.random_range(0.05..8.0));
        let p = Point::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0));
        let back = cam.to_document_space(cam.to_surface(p), Point::default());
        assert!((back.x - p.x).abs() < 1e-6 && (back.y - p.y).abs() < 1e-6, "{p:?} -> {back:?}");
    }
}

// =============================================================
// Gesture baseline
// =============================================================

#[test]
fn pointer_to_document_without_scroll_matches_surface() {
    let cam = camera(1.0);
    let base = cam.baseline();
    assert!(point_approx_eq(cam.pointer_to_document(Point::new(5.0, 6.0), base), Point::new(5.0, 6.0)));
}

#[test]
fn pointer_to_document_tracks_scroll_since_gesture_start() {
    let mut cam = camera(2.0);
    cam.scroll = Point::new(100.0, 0.0);
    let base = cam.baseline();
    let before = cam.pointer_to_document(Point::new(50.0, 50.0), base);

    cam.scroll = Point::new(140.0, 20.0);
    let after = cam.pointer_to_document(Point::new(50.0, 50.0), base);

    assert!(point_approx_eq(before, Point::new(75.0, 25.0)));
    assert!(point_approx_eq(after, Point::new(95.0, 35.0)));
}

#[test]
fn to_viewport_inverts_pointer_mapping() {
    let mut cam = camera(1.5);
    cam.scroll = Point::new(30.0, 60.0);
    let doc = Point::new(120.0, 90.0);
    let vp = cam.to_viewport(doc);
    let back = cam.pointer_to_document(vp, cam.baseline());
    assert!(point_approx_eq(back, doc));
}

#[test]
fn screen_dist_to_doc_divides_by_scale() {
    assert!(approx_eq(camera(4.0).screen_dist_to_doc(8.0), 2.0));
}

// =============================================================
// Scroll clamping
// =============================================================

#[test]
fn max_scroll_is_surface_minus_viewport() {
    let cam = camera(1.0);
    assert_eq!(cam.max_scroll(), Point::new(600.0, 1100.0));
}

#[test]
fn max_scroll_never_negative() {
    let mut cam = camera(1.0);
    cam.surface = Surface::uniform(100.0, 100.0);
    assert_eq!(cam.max_scroll(), Point::new(0.0, 0.0));
}

#[test]
fn clamp_scroll_bounds_both_axes() {
    let cam = camera(1.0);
    assert_eq!(cam.clamp_scroll(Point::new(-10.0, 5000.0)), Point::new(0.0, 1100.0));
    assert_eq!(cam.clamp_scroll(Point::new(20.0, 30.0)), Point::new(20.0, 30.0));
}
