//! Edge auto-scroll while dragging a selection.
//!
//! The target speed per axis eases in quadratically as the pointer gets
//! closer to a viewport edge. The applied speed chases the target with
//! linear interpolation when speeding up and snaps straight down when slowing,
//! so stops feel crisp. After release the speed decays geometrically until it
//! falls under the floor, at which point the loop stops asking for frames.
//!
//! All speed math is pure (`edge_speed`, `target_velocity`, `step_speed`,
//! `release_speed`); [`AutoScroller`] only holds the current phase and velocity.

#[cfg(test)]
#[path = "autoscroll_test.rs"]
mod autoscroll_test;

use tracing::{debug, trace};

use crate::config::AutoScrollConfig;
use crate::geom::Point;

/// Longest frame gap honoured in one step, in nominal frames.
const MAX_FRAMES_PER_STEP: f64 = 4.0;

/// Speed contributed by an edge `distance` viewport pixels away.
///
/// `((threshold - distance) / threshold)^2 * max_speed` inside the band, zero outside.
#[must_use]
pub fn edge_speed(distance: f64, cfg: &AutoScrollConfig) -> f64 {
    if distance >= cfg.threshold {
        return 0.0;
    }
    let t = (cfg.threshold - distance.max(0.0)) / cfg.threshold;
    t * t * cfg.max_speed
}

/// Signed target velocity for a pointer at viewport position `pointer`.
///
/// Each axis heads toward its nearer edge. Targets under the floor are zero.
#[must_use]
pub fn target_velocity(pointer: Point, viewport_width: f64, viewport_height: f64, cfg: &AutoScrollConfig) -> Point {
    let axis = |pos: f64, extent: f64| {
        let near = pos;
        let far = extent - pos;
        let speed = if near <= far { -edge_speed(near, cfg) } else { edge_speed(far, cfg) };
        if speed.abs() < cfg.min_speed { 0.0 } else { speed }
    };
    Point::new(axis(pointer.x, viewport_width), axis(pointer.y, viewport_height))
}

/// Advance one axis toward `target` over `frames` nominal frames.
///
/// Ramps up by interpolation, ramps down by snapping to the target.
#[must_use]
pub fn step_speed(current: f64, target: f64, frames: f64, cfg: &AutoScrollConfig) -> f64 {
    if target.abs() > current.abs() {
        let t = (cfg.acceleration * frames).min(1.0);
        current + (target - current) * t
    } else {
        target
    }
}

/// Speed after `frames` nominal frames of post-release decay.
#[must_use]
pub fn release_speed(current: f64, frames: f64, cfg: &AutoScrollConfig) -> f64 {
    let next = current * cfg.release_decay.powf(frames);
    if next.abs() < cfg.min_speed { 0.0 } else { next }
}

/// Nominal frames covered by `elapsed_ms`, capped so a stalled tab doesn't lurch.
#[must_use]
pub fn frames_for(elapsed_ms: f64, cfg: &AutoScrollConfig) -> f64 {
    if elapsed_ms <= 0.0 || cfg.frame_ms <= 0.0 {
        return 0.0;
    }
    (elapsed_ms / cfg.frame_ms).min(MAX_FRAMES_PER_STEP)
}

/// Lifecycle phase of the scroll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No loop armed.
    #[default]
    Idle,
    /// A move is in progress; velocity follows the pointer's edge distance.
    Dragging,
    /// The drag ended; velocity decays toward zero.
    Releasing,
}

/// Velocity state of the auto-scroll loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoScroller {
    phase: Phase,
    velocity: Point,
    target: Point,
}

impl AutoScroller {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current velocity in viewport pixels per frame.
    #[must_use]
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Begin tracking a drag. Velocity starts from rest.
    pub fn engage(&mut self) {
        *self = Self { phase: Phase::Dragging, ..Self::default() };
    }

    /// Update the target from the pointer position. Returns `true` when the
    /// loop was idle and now needs frames.
    pub fn track(&mut self, pointer: Point, viewport_width: f64, viewport_height: f64, cfg: &AutoScrollConfig) -> bool {
        if self.phase != Phase::Dragging {
            return false;
        }
        let was_running = self.is_running();
        self.target = target_velocity(pointer, viewport_width, viewport_height, cfg);
        !was_running && self.is_running()
    }

    /// Whether the loop wants another frame.
    #[must_use]
    pub fn is_running(&self) -> bool {
        let moving = self.velocity.x != 0.0 || self.velocity.y != 0.0;
        match self.phase {
            Phase::Idle => false,
            Phase::Dragging => moving || self.target.x != 0.0 || self.target.y != 0.0,
            Phase::Releasing => moving,
        }
    }

    /// Advance by `elapsed_ms` and return the scroll delta for this step.
    pub fn step(&mut self, elapsed_ms: f64, cfg: &AutoScrollConfig) -> Point {
        let frames = frames_for(elapsed_ms, cfg);
        self.velocity = match self.phase {
            Phase::Idle => Point::default(),
            Phase::Dragging => Point::new(
                step_speed(self.velocity.x, self.target.x, frames, cfg),
                step_speed(self.velocity.y, self.target.y, frames, cfg),
            ),
            Phase::Releasing => Point::new(
                release_speed(self.velocity.x, frames, cfg),
                release_speed(self.velocity.y, frames, cfg),
            ),
        };
        if self.phase == Phase::Releasing && !self.is_running() {
            debug!("auto-scroll settled");
            self.phase = Phase::Idle;
        }
        trace!(vx = self.velocity.x, vy = self.velocity.y, frames, "auto-scroll step");
        self.velocity.scaled(frames)
    }

    /// The drag ended: let the current speed decay out.
    pub fn release(&mut self) {
        self.target = Point::default();
        self.phase = if self.velocity == Point::default() { Phase::Idle } else { Phase::Releasing };
        debug!(phase = ?self.phase, vx = self.velocity.x, vy = self.velocity.y, "auto-scroll released");
    }

    /// Stop immediately, with no decay.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}
