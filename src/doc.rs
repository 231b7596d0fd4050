//! Document model: annotations, their style, and the ordered per-page list.
//!
//! This module defines the persisted unit of markup (`Annotation`), its type
//! enumeration (`AnnotationKind`), the style bag read from the toolbar
//! (`Style`, `TextOptions`), and the runtime list that owns every annotation
//! on the current page (`PageAnnotations`).
//!
//! Paint order is list order: the last annotation is drawn on top and wins
//! hit-tests. Data flows into this layer from the store (JSON, camelCase
//! fields) and from the engine (creation and in-place mutation).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{STAMP_BOX, STICKY_BOX, TEXT_BOX};
use crate::geom::Point;

/// Unique identifier for an annotation.
pub type AnnotationId = Uuid;

/// The type of an annotation. Serialised as a camelCase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnotationKind {
    /// Arbitrary-length pen path.
    Freehand,
    /// Straight segment between two points.
    Line,
    /// Rectangle spanning a two-point diagonal.
    Rectangle,
    /// Circle in center+radius or diameter mode (see [`CircleMode`]).
    Circle,
    /// Isosceles triangle inscribed in the two-point box.
    Triangle,
    /// Five-point star inscribed in the two-point box.
    Star,
    /// Segment with an arrowhead at the second point.
    Arrow,
    /// Segment with arrowheads at both ends.
    DoubleArrow,
    /// Translucent band over page content.
    Highlight,
    /// Free text box anchored at its top-left corner.
    Text,
    /// Sticky note anchored at its top-left corner.
    StickyNote,
    /// Plain stamp with a custom label.
    Stamp,
    StampApproved,
    StampRejected,
    StampDraft,
    StampConfidential,
    StampFinal,
}

impl AnnotationKind {
    /// Stamp and all of its labelled variants.
    #[must_use]
    pub fn is_stamp(self) -> bool {
        matches!(
            self,
            Self::Stamp
                | Self::StampApproved
                | Self::StampRejected
                | Self::StampDraft
                | Self::StampConfidential
                | Self::StampFinal
        )
    }

    /// Types that carry editable text in a box.
    #[must_use]
    pub fn is_text_like(self) -> bool {
        matches!(self, Self::Text | Self::StickyNote)
    }

    /// Types positioned by a single anchor point plus a box size.
    #[must_use]
    pub fn is_anchored(self) -> bool {
        self.is_text_like() || self.is_stamp()
    }

    /// Open segments whose two points are endpoints rather than a diagonal.
    #[must_use]
    pub fn is_line_like(self) -> bool {
        matches!(self, Self::Line | Self::Arrow | Self::DoubleArrow)
    }

    /// Label painted inside a stamp. `None` for non-stamp types.
    #[must_use]
    pub fn stamp_label(self) -> Option<&'static str> {
        match self {
            Self::Stamp => Some("STAMP"),
            Self::StampApproved => Some("APPROVED"),
            Self::StampRejected => Some("REJECTED"),
            Self::StampDraft => Some("DRAFT"),
            Self::StampConfidential => Some("CONFIDENTIAL"),
            Self::StampFinal => Some("FINAL"),
            _ => None,
        }
    }

    /// Default box for anchored types; `None` for point-defined shapes.
    #[must_use]
    pub fn default_box(self) -> Option<(f64, f64)> {
        match self {
            Self::Text => Some(TEXT_BOX),
            Self::StickyNote => Some(STICKY_BOX),
            kind if kind.is_stamp() => Some(STAMP_BOX),
            _ => None,
        }
    }
}

/// How a circle's two points define it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CircleMode {
    /// First point is the center; the second lies on the perimeter.
    #[default]
    CenterRadius,
    /// The two points are the ends of a diameter.
    Diameter,
}

/// Font and content options for text-bearing annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextOptions {
    pub font_size: f64,
    pub font_family: String,
    pub bold: bool,
    pub italic: bool,
    /// Literal text content.
    pub text: String,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self { font_size: 16.0, font_family: "sans-serif".into(), bold: false, italic: false, text: String::new() }
    }
}

impl TextOptions {
    /// CSS font shorthand, e.g. `"italic bold 16px sans-serif"`.
    #[must_use]
    pub fn css_font(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        if self.italic {
            parts.push("italic".to_owned());
        }
        if self.bold {
            parts.push("bold".to_owned());
        }
        parts.push(format!("{}px", self.font_size));
        parts.push(self.font_family.clone());
        parts.join(" ")
    }
}

/// Visual style captured from the toolbar at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    /// CSS color string.
    pub color: String,
    /// Stroke width in document units.
    pub stroke_width: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Circle definition mode; ignored by other types.
    pub circle_mode: CircleMode,
    pub text: TextOptions,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: "#E53935".into(),
            stroke_width: 2.0,
            opacity: 1.0,
            circle_mode: CircleMode::default(),
            text: TextOptions::default(),
        }
    }
}

/// An annotation as stored in the document and handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Stable identifier, unique within a document.
    pub id: AnnotationId,
    /// Shape type.
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    /// Document-space geometry; meaning depends on `kind`.
    pub points: Vec<Point>,
    #[serde(default)]
    pub style: Style,
    /// Page this annotation belongs to.
    pub page_number: u32,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Author, if known.
    #[serde(default)]
    pub author_id: Option<Uuid>,
    /// Edit counter; not incremented automatically by the engine.
    #[serde(default)]
    pub version: i64,
    /// Explicit box width for anchored types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Explicit box height for anchored types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Annotation {
    /// A fresh annotation with a new id, stamped with the current time.
    #[must_use]
    pub fn new(kind: AnnotationKind, points: Vec<Point>, style: Style, page_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            points,
            style,
            page_number,
            timestamp: now_ms(),
            author_id: None,
            version: 1,
            width: None,
            height: None,
        }
    }

    /// An anchored annotation whose box is centered on `center`.
    #[must_use]
    pub fn centered_box(
        kind: AnnotationKind,
        center: Point,
        size: (f64, f64),
        style: Style,
        page_number: u32,
    ) -> Self {
        let (w, h) = size;
        let anchor = Point::new(center.x - w / 2.0, center.y - h / 2.0);
        Self { width: Some(w), height: Some(h), ..Self::new(kind, vec![anchor], style, page_number) }
    }

    /// First point: the anchor for anchored types, the start for everything else.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.points.first().copied().unwrap_or_default()
    }

    /// Box size for anchored types: explicit size, else the type default,
    /// widened to fit the text when it is longer than the box.
    #[must_use]
    pub fn box_size(&self) -> (f64, f64) {
        let (dw, dh) = self.kind.default_box().unwrap_or_default();
        let w = self.width.unwrap_or(dw);
        let h = self.height.unwrap_or(dh);
        if self.kind != AnnotationKind::Text {
            return (w, h);
        }
        let opts = &self.style.text;
        let longest = opts.text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        #[allow(clippy::cast_precision_loss)]
        let measured = longest as f64 * opts.font_size * 0.6;
        (w.max(measured), h)
    }

    /// Translate every point by `delta`.
    pub fn translate(&mut self, delta: Point) {
        for p in &mut self.points {
            *p = *p + delta;
        }
    }
}

/// Ordered list of the annotations on one page. Index order is paint order.
#[derive(Debug, Clone, Default)]
pub struct PageAnnotations {
    page_number: u32,
    items: Vec<Annotation>,
}

impl PageAnnotations {
    /// Create an empty list for `page_number`.
    #[must_use]
    pub fn new(page_number: u32) -> Self {
        Self { page_number, items: Vec::new() }
    }

    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Replace the whole list with a fresh snapshot for `page_number`.
    /// Annotations belonging to other pages are dropped.
    pub fn load(&mut self, page_number: u32, annotations: Vec<Annotation>) {
        self.page_number = page_number;
        self.items = annotations
            .into_iter()
            .filter(|a| a.page_number == page_number)
            .collect();
    }

    /// Insert or replace by id. New annotations go on top.
    pub fn upsert(&mut self, annotation: Annotation) {
        match self.items.iter_mut().find(|a| a.id == annotation.id) {
            Some(slot) => *slot = annotation,
            None => self.items.push(annotation),
        }
    }

    /// Remove an annotation by id, returning it if it was present.
    pub fn remove(&mut self, id: &AnnotationId) -> Option<Annotation> {
        let idx = self.items.iter().position(|a| &a.id == id)?;
        Some(self.items.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.items.iter().find(|a| &a.id == id)
    }

    pub fn get_mut(&mut self, id: &AnnotationId) -> Option<&mut Annotation> {
        self.items.iter_mut().find(|a| &a.id == id)
    }

    /// All annotations in paint order (bottom first).
    #[must_use]
    pub fn as_slice(&self) -> &[Annotation] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<AnnotationId> {
        self.items.iter().map(|a| a.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Current time as milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn now_ms() -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let ms = js_sys::Date::now() as i64;
    ms
}

/// Current time as milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}
