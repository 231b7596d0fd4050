//! Engine tuning parsed from environment variables.
//!
//! Every threshold the state machine and auto-scroll controller consult lives
//! here so hosts can tune feel without a rebuild. In the browser the process
//! environment is empty and [`EngineConfig::default`] applies.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{
    AUTOSCROLL_ACCELERATION, AUTOSCROLL_MAX_SPEED, AUTOSCROLL_MIN_SPEED, AUTOSCROLL_RELEASE_DECAY,
    AUTOSCROLL_THRESHOLD, FRAME_MS, FREEHAND_MIN_DISTANCE, HANDLE_TOLERANCE_PX, MIN_HIT_BUFFER, STAMP_BOX,
    STICKY_BOX, TEXT_BOX,
};
use crate::doc::AnnotationKind;

/// Auto-scroll feel: edge band, speed envelope, and frame pacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollConfig {
    /// Edge band width in viewport pixels.
    pub threshold: f64,
    /// Peak speed in viewport pixels per frame.
    pub max_speed: f64,
    /// Ramp-up interpolation factor in `(0, 1]`.
    pub acceleration: f64,
    /// Speeds below this are clamped to zero.
    pub min_speed: f64,
    /// Geometric decay applied per frame after release.
    pub release_decay: f64,
    /// Nominal frame length; `elapsed / frame_ms` scales each step.
    pub frame_ms: f64,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            threshold: AUTOSCROLL_THRESHOLD,
            max_speed: AUTOSCROLL_MAX_SPEED,
            acceleration: AUTOSCROLL_ACCELERATION,
            min_speed: AUTOSCROLL_MIN_SPEED,
            release_decay: AUTOSCROLL_RELEASE_DECAY,
            frame_ms: FRAME_MS,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Minimum document-space spacing between freehand samples.
    pub freehand_min_distance: f64,
    /// Resize handle slop in device pixels.
    pub handle_tolerance_px: f64,
    /// Floor for the stroke-width hit buffer.
    pub min_hit_buffer: f64,
    /// Default text box `(width, height)`.
    pub text_box: (f64, f64),
    /// Default sticky note `(width, height)`.
    pub sticky_box: (f64, f64),
    /// Default stamp `(width, height)`.
    pub stamp_box: (f64, f64),
    pub autoscroll: AutoScrollConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            freehand_min_distance: FREEHAND_MIN_DISTANCE,
            handle_tolerance_px: HANDLE_TOLERANCE_PX,
            min_hit_buffer: MIN_HIT_BUFFER,
            text_box: TEXT_BOX,
            sticky_box: STICKY_BOX,
            stamp_box: STAMP_BOX,
            autoscroll: AutoScrollConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Recognised:
    /// - `DOCMARK_FREEHAND_MIN_DISTANCE`
    /// - `DOCMARK_HANDLE_TOLERANCE_PX`
    /// - `DOCMARK_MIN_HIT_BUFFER`
    /// - `DOCMARK_AUTOSCROLL_THRESHOLD`
    /// - `DOCMARK_AUTOSCROLL_MAX_SPEED`
    /// - `DOCMARK_AUTOSCROLL_ACCELERATION`
    /// - `DOCMARK_AUTOSCROLL_MIN_SPEED`
    /// - `DOCMARK_AUTOSCROLL_RELEASE_DECAY`
    ///
    /// Values that fail to parse, or that are not positive, are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let base = Self::default();
        let autoscroll = AutoScrollConfig {
            threshold: env_positive("DOCMARK_AUTOSCROLL_THRESHOLD", base.autoscroll.threshold),
            max_speed: env_positive("DOCMARK_AUTOSCROLL_MAX_SPEED", base.autoscroll.max_speed),
            acceleration: env_positive("DOCMARK_AUTOSCROLL_ACCELERATION", base.autoscroll.acceleration).min(1.0),
            min_speed: env_positive("DOCMARK_AUTOSCROLL_MIN_SPEED", base.autoscroll.min_speed),
            release_decay: env_positive("DOCMARK_AUTOSCROLL_RELEASE_DECAY", base.autoscroll.release_decay).min(0.99),
            ..base.autoscroll
        };
        Self {
            freehand_min_distance: env_positive("DOCMARK_FREEHAND_MIN_DISTANCE", base.freehand_min_distance),
            handle_tolerance_px: env_positive("DOCMARK_HANDLE_TOLERANCE_PX", base.handle_tolerance_px),
            min_hit_buffer: env_positive("DOCMARK_MIN_HIT_BUFFER", base.min_hit_buffer),
            autoscroll,
            ..base
        }
    }

    /// Configured box for anchored kinds; `None` for point-defined shapes.
    #[must_use]
    pub fn box_for(&self, kind: AnnotationKind) -> Option<(f64, f64)> {
        match kind {
            AnnotationKind::Text => Some(self.text_box),
            AnnotationKind::StickyNote => Some(self.sticky_box),
            kind if kind.is_stamp() => Some(self.stamp_box),
            _ => None,
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

fn env_positive(key: &str, default: f64) -> f64 {
    let value = env_parse(key, default);
    if value.is_finite() && value > 0.0 { value } else { default }
}
