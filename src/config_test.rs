#![allow(clippy::float_cmp)]

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`env_lock`] so no other test touches the environment.
unsafe fn clear_docmark_env() {
    unsafe {
        std::env::remove_var("DOCMARK_FREEHAND_MIN_DISTANCE");
        std::env::remove_var("DOCMARK_HANDLE_TOLERANCE_PX");
        std::env::remove_var("DOCMARK_MIN_HIT_BUFFER");
        std::env::remove_var("DOCMARK_AUTOSCROLL_THRESHOLD");
        std::env::remove_var("DOCMARK_AUTOSCROLL_MAX_SPEED");
        std::env::remove_var("DOCMARK_AUTOSCROLL_ACCELERATION");
        std::env::remove_var("DOCMARK_AUTOSCROLL_MIN_SPEED");
        std::env::remove_var("DOCMARK_AUTOSCROLL_RELEASE_DECAY");
        std::env::remove_var("DOCMARK_TEST_INT");
    }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_matches_interaction_constants() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.freehand_min_distance, 2.0);
    assert_eq!(cfg.handle_tolerance_px, 8.0);
    assert_eq!(cfg.min_hit_buffer, 5.0);
    assert_eq!(cfg.text_box, (120.0, 40.0));
    assert_eq!(cfg.sticky_box, (200.0, 150.0));
    assert_eq!(cfg.autoscroll.threshold, 80.0);
}

#[test]
fn box_for_covers_anchored_kinds_only() {
    let cfg = EngineConfig { sticky_box: (300.0, 300.0), ..EngineConfig::default() };
    assert_eq!(cfg.box_for(AnnotationKind::Text), Some((120.0, 40.0)));
    assert_eq!(cfg.box_for(AnnotationKind::StickyNote), Some((300.0, 300.0)));
    assert_eq!(cfg.box_for(AnnotationKind::StampDraft), Some((150.0, 50.0)));
    assert_eq!(cfg.box_for(AnnotationKind::Rectangle), None);
}

#[test]
fn autoscroll_default_decays_below_one() {
    let cfg = AutoScrollConfig::default();
    assert!(cfg.release_decay > 0.0 && cfg.release_decay < 1.0);
    assert!(cfg.acceleration > 0.0 && cfg.acceleration <= 1.0);
    assert!(cfg.min_speed < cfg.max_speed);
}

// =============================================================
// from_env
// =============================================================

#[test]
fn from_env_without_overrides_is_default() {
    let _env = env_lock();
    unsafe { clear_docmark_env() };
    assert_eq!(EngineConfig::from_env(), EngineConfig::default());
}

#[test]
fn from_env_applies_overrides() {
    let _env = env_lock();
    unsafe {
        clear_docmark_env();
        std::env::set_var("DOCMARK_AUTOSCROLL_THRESHOLD", "120");
        std::env::set_var("DOCMARK_FREEHAND_MIN_DISTANCE", " 3.5 ");
        std::env::set_var("DOCMARK_AUTOSCROLL_RELEASE_DECAY", "4");
        std::env::set_var("DOCMARK_MIN_HIT_BUFFER", "12");
    }

    let cfg = EngineConfig::from_env();
    assert_eq!(cfg.autoscroll.threshold, 120.0);
    assert_eq!(cfg.min_hit_buffer, 12.0);
    assert_eq!(cfg.freehand_min_distance, 3.5);
    assert_eq!(cfg.autoscroll.release_decay, 0.99);
    assert_eq!(cfg.autoscroll.max_speed, AutoScrollConfig::default().max_speed);

    unsafe { clear_docmark_env() };
}

#[test]
fn from_env_ignores_garbage_and_non_positive() {
    let _env = env_lock();
    unsafe {
        clear_docmark_env();
        std::env::set_var("DOCMARK_AUTOSCROLL_MAX_SPEED", "fast");
        std::env::set_var("DOCMARK_HANDLE_TOLERANCE_PX", "-4");
    }

    let cfg = EngineConfig::from_env();
    assert_eq!(cfg.autoscroll.max_speed, 20.0);
    assert_eq!(cfg.handle_tolerance_px, 8.0);

    unsafe { clear_docmark_env() };
}

#[test]
fn env_parse_falls_back_on_missing_key() {
    let _env = env_lock();
    unsafe { clear_docmark_env() };
    assert_eq!(env_parse::<u32>("DOCMARK_TEST_INT", 7), 7);
    unsafe { std::env::set_var("DOCMARK_TEST_INT", "9") };
    assert_eq!(env_parse::<u32>("DOCMARK_TEST_INT", 7), 9);
    unsafe { clear_docmark_env() };
}
