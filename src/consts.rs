//! Shared numeric constants for the annotation engine.

// ── Math ────────────────────────────────────────────────────────

/// π / 5 (36°), the angular step of a 10-vertex star polygon.
pub const FRAC_PI_5: f64 = std::f64::consts::PI / 5.0;

/// Inner-to-outer radius ratio for the default 5-point star.
pub const STAR_INNER_RATIO: f64 = 0.5;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_TOLERANCE_PX: f64 = 8.0;

/// Lower bound on the stroke-derived hit buffer, in screen pixels.
pub const MIN_HIT_BUFFER: f64 = 5.0;

/// Floating-point slack used by containment and intersection tests.
pub const GEOM_EPSILON: f64 = 1e-9;

// ── Drawing ─────────────────────────────────────────────────────

/// Minimum document-space distance between recorded freehand samples.
pub const FREEHAND_MIN_DISTANCE: f64 = 2.0;

/// Default text box size in document units.
pub const TEXT_BOX: (f64, f64) = (120.0, 40.0);

/// Default sticky note size in document units.
pub const STICKY_BOX: (f64, f64) = (200.0, 150.0);

/// Default stamp size in document units.
pub const STAMP_BOX: (f64, f64) = (150.0, 50.0);

/// Highlights are painted at this fraction of the style opacity.
pub const HIGHLIGHT_ALPHA: f64 = 0.35;

// ── Auto-scroll ─────────────────────────────────────────────────

/// Distance from a viewport edge, in viewport pixels, inside which auto-scroll engages.
pub const AUTOSCROLL_THRESHOLD: f64 = 80.0;

/// Peak scroll speed in viewport pixels per frame.
pub const AUTOSCROLL_MAX_SPEED: f64 = 20.0;

/// Fraction of the gap to the target speed closed each frame while ramping up.
pub const AUTOSCROLL_ACCELERATION: f64 = 0.15;

/// Speeds below this floor are treated as zero.
pub const AUTOSCROLL_MIN_SPEED: f64 = 0.5;

/// Per-frame multiplier applied to the speed after the drag ends.
pub const AUTOSCROLL_RELEASE_DECAY: f64 = 0.85;

/// Nominal animation frame length in milliseconds.
pub const FRAME_MS: f64 = 16.0;
