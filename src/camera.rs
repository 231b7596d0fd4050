#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::geom::Point;

/// Size of the page rendering surface: its backing store vs. its on-screen box.
///
/// The backing store may be larger than the displayed box (high-DPI rendering);
/// pointer offsets are scaled by `backing / display` before zoom is removed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surface {
    pub backing_width: f64,
    pub backing_height: f64,
    pub display_width: f64,
    pub display_height: f64,
}

impl Surface {
    /// Surface whose backing store matches its displayed size.
    #[must_use]
    pub fn uniform(width: f64, height: f64) -> Self {
        Self { backing_width: width, backing_height: height, display_width: width, display_height: height }
    }

    /// Backing-to-display ratio per axis; `1.0` when either side is unknown.
    #[must_use]
    pub fn ratio(&self) -> (f64, f64) {
        let rx = if self.display_width > 0.0 && self.backing_width > 0.0 {
            self.backing_width / self.display_width
        } else {
            1.0
        };
        let ry = if self.display_height > 0.0 && self.backing_height > 0.0 {
            self.backing_height / self.display_height
        } else {
            1.0
        };
        (rx, ry)
    }
}

/// Scroll position captured once when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollBaseline {
    pub scroll: Point,
}

/// View state supplied by the page renderer: zoom, scroll, and sizes.
///
/// `scroll` is the viewport's scroll offset in viewport pixels. Pointer input
/// arrives relative to the viewport (the scroll container), whose on-screen
/// box does not move when content scrolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Zoom factor (> 0).
    pub scale: f64,
    pub scroll: Point,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub surface: Surface,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scale: 1.0, scroll: Point::default(), viewport_width: 0.0, viewport_height: 0.0, surface: Surface::default() }
    }
}

impl Camera {
    /// Convert a point relative to the surface box into document space.
    ///
    /// `scroll_drift` is how far the viewport has scrolled since the active
    /// gesture began (not since the last event), so a stroke stays continuous
    /// when the view scrolls under a stationary pointer.
    #[must_use]
    pub fn to_document_space(&self, surface_pt: Point, scroll_drift: Point) -> Point {
        let (rx, ry) = self.surface.ratio();
        Point {
            x: (surface_pt.x + scroll_drift.x) * rx / self.scale,
            y: (surface_pt.y + scroll_drift.y) * ry / self.scale,
        }
    }

    /// Inverse of [`Camera::to_document_space`] with zero drift.
    #[must_use]
    pub fn to_surface(&self, doc: Point) -> Point {
        let (rx, ry) = self.surface.ratio();
        Point { x: doc.x * self.scale / rx, y: doc.y * self.scale / ry }
    }

    /// Document point to viewport coordinates at the current scroll.
    #[must_use]
    pub fn to_viewport(&self, doc: Point) -> Point {
        self.to_surface(doc) - self.scroll
    }

    /// Capture the scroll baseline for a new gesture.
    #[must_use]
    pub fn baseline(&self) -> ScrollBaseline {
        ScrollBaseline { scroll: self.scroll }
    }

    /// Map a viewport-relative pointer position to document space for a
    /// gesture that started at `baseline`.
    #[must_use]
    pub fn pointer_to_document(&self, viewport_pt: Point, baseline: ScrollBaseline) -> Point {
        let surface_at_start = viewport_pt + baseline.scroll;
        let drift = self.scroll - baseline.scroll;
        self.to_document_space(surface_at_start, drift)
    }

    /// Convert a viewport-pixel distance to document units.
    #[must_use]
    pub fn screen_dist_to_doc(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Largest scroll offset that keeps the surface covering the viewport.
    #[must_use]
    pub fn max_scroll(&self) -> Point {
        Point {
            x: (self.surface.display_width - self.viewport_width).max(0.0),
            y: (self.surface.display_height - self.viewport_height).max(0.0),
        }
    }

    /// Clamp a scroll offset to `[0, max_scroll]` on both axes.
    #[must_use]
    pub fn clamp_scroll(&self, scroll: Point) -> Point {
        let max = self.max_scroll();
        Point { x: scroll.x.clamp(0.0, max.x), y: scroll.y.clamp(0.0, max.y) }
    }
}
