//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! This module defines the types consumed by the engine. `Tool` and `Style`
//! capture the toolbar's intent at the time of a pointer event. `InputState`
//! is the active gesture tracked between pointer-down and pointer-up,
//! carrying all context needed to compute incremental updates and to commit
//! or abandon the gesture on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::str::FromStr;

use crate::camera::ScrollBaseline;
use crate::doc::{Annotation, AnnotationId, AnnotationKind, Style};
use crate::geom::{Bounds, Point};
use crate::hit::Handle;
use crate::selection::Selection;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Drag the view without touching annotations.
    Drag,
    /// Create annotations of the given type.
    Draw(AnnotationKind),
}

impl Tool {
    /// Whether this tool commits on pointer-down (text, sticky note, stamps).
    #[must_use]
    pub fn is_click_to_place(self) -> bool {
        matches!(self, Self::Draw(kind) if kind.is_anchored())
    }

    /// Whether this tool draws by dragging a two-point preview.
    #[must_use]
    pub fn is_drag_to_draw(self) -> bool {
        matches!(self, Self::Draw(kind) if !kind.is_anchored() && kind != AnnotationKind::Freehand)
    }
}

/// Error returned when a host tool name does not match any tool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    /// Parse a host tool name: `"select"`, `"drag"`, or any annotation type
    /// name such as `"doubleArrow"` or `"stampApproved"`.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "select" => Ok(Self::Select),
            "drag" => Ok(Self::Drag),
            other => serde_json::from_value::<AnnotationKind>(serde_json::Value::String(other.to_owned()))
                .map(Self::Draw)
                .map_err(|_| UnknownTool(other.to_owned())),
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Modifier that requests uniform circle scaling during resize.
    #[must_use]
    pub fn uniform(self) -> bool {
        self.shift
    }

    /// Platform command modifier (ctrl or meta).
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Style applied to newly created annotations.
    pub style: Style,
    /// Selected annotations in selection order.
    pub selection: Selection,
    /// Document-space pointer position while hovering with a click-to-place tool.
    pub hover: Option<Point>,
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute updates and
/// to commit or abandon the gesture.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging the view with the drag tool.
    Panning {
        /// Viewport position of the previous pointer event.
        last_viewport: Point,
    },
    /// Drag-to-draw of a two-point shape; the first point stays fixed.
    DrawingShape {
        baseline: ScrollBaseline,
        /// Uncommitted annotation, points `[start, current]`.
        preview: Annotation,
    },
    /// Freehand stroke being sampled.
    DrawingFreehand {
        baseline: ScrollBaseline,
        /// Uncommitted stroke; points grow as the pointer moves.
        preview: Annotation,
        /// Scroll offset at the last recorded sample.
        last_sample_scroll: Point,
    },
    /// Rubber-band selection box.
    Selecting {
        baseline: ScrollBaseline,
        /// Document-space corner where the band started.
        start: Point,
        /// Document-space corner under the pointer.
        current: Point,
    },
    /// Translating the selection.
    Moving {
        baseline: ScrollBaseline,
        /// Document-space pointer position at the previous update.
        last_doc: Point,
        /// Selected annotations as they were at pointer-down, for abandonment.
        originals: Vec<Annotation>,
    },
    /// Dragging one resize handle of a single selected annotation.
    Resizing {
        baseline: ScrollBaseline,
        id: AnnotationId,
        handle: Handle,
        /// Geometry at pointer-down; every update resizes from this.
        original: Annotation,
    },
    /// The host's inline editor is open for a text or sticky annotation.
    EditingText { id: AnnotationId },
}

impl InputState {
    /// Whether a pointer gesture is open (pointer is down).
    #[must_use]
    pub fn is_gesture(&self) -> bool {
        !matches!(self, Self::Idle | Self::EditingText { .. })
    }

    /// Rubber band in document space, while selecting.
    #[must_use]
    pub fn selection_band(&self) -> Option<Bounds> {
        match self {
            Self::Selecting { start, current, .. } => Some(Bounds::from_corners(*start, *current)),
            _ => None,
        }
    }

    /// Uncommitted annotation being drawn, if any.
    #[must_use]
    pub fn preview(&self) -> Option<&Annotation> {
        match self {
            Self::DrawingShape { preview, .. } | Self::DrawingFreehand { preview, .. } => Some(preview),
            _ => None,
        }
    }
}
