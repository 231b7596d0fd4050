use tracing::{debug, info, trace};
use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::autoscroll::AutoScroller;
use crate::camera::{Camera, ScrollBaseline, Surface};
use crate::config::EngineConfig;
use crate::doc::{Annotation, AnnotationId, AnnotationKind, PageAnnotations, Style};
use crate::geom::{Bounds, Point};
use crate::hit::{self, Hit, HitPart};
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState};
use crate::render;
use crate::selection;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new annotation was committed; forward to `addAnnotation`.
    AnnotationCreated(Annotation),
    /// An annotation changed in place; forward the full object to `updateAnnotation`.
    AnnotationUpdated(Annotation),
    /// An annotation was removed; forward to `deleteAnnotation`.
    AnnotationDeleted { id: AnnotationId },
    /// Open the inline text editor at `anchor` (viewport pixels).
    EditTextRequested { id: AnnotationId, text: String, anchor: Point },
    /// The engine switched tools on its own (text placement reverts to select).
    ToolChanged(Tool),
    /// The selection set changed; carries the new ids in order.
    SelectionChanged(Vec<AnnotationId>),
    SetCursor(&'static str),
    /// Scroll the viewport to this offset.
    ScrollTo { x: f64, y: f64 },
    /// Call [`EngineCore::on_frame`] on the next animation frame.
    RequestFrame,
    RenderNeeded,
}

/// Engine state and logic with no dependency on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub page: PageAnnotations,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub autoscroll: AutoScroller,
    pub config: EngineConfig,
    /// Stamped onto every annotation this engine creates.
    pub author_id: Option<Uuid>,
    cursor: &'static str,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            page: PageAnnotations::new(1),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            autoscroll: AutoScroller::default(),
            config,
            author_id: None,
            cursor: "default",
        }
    }

    // --- Data inputs ---

    /// Switch to `page_number` with the store's canonical list for it.
    ///
    /// Any open gesture is dropped, auto-scroll stops, and the selection clears.
    pub fn load_page(&mut self, page_number: u32, annotations: Vec<Annotation>) {
        self.input = InputState::Idle;
        self.autoscroll.cancel();
        self.ui.selection.clear();
        self.ui.hover = None;
        let annotations = annotations.into_iter().map(|a| self.sized(a)).collect();
        self.page.load(page_number, annotations);
        info!(page_number, count = self.page.len(), "annotation page loaded");
    }

    /// Mirror an annotation added by the store.
    pub fn apply_create(&mut self, annotation: Annotation) {
        if annotation.page_number == self.page.page_number() {
            let annotation = self.sized(annotation);
            self.page.upsert(annotation);
        }
    }

    /// Mirror an annotation replaced by the store.
    pub fn apply_update(&mut self, annotation: Annotation) {
        if annotation.page_number == self.page.page_number() {
            let annotation = self.sized(annotation);
            self.page.upsert(annotation);
        } else {
            self.apply_delete(&annotation.id);
        }
    }

    /// Mirror an annotation deleted by the store.
    pub fn apply_delete(&mut self, id: &AnnotationId) {
        self.page.remove(id);
        self.ui.selection.remove(id);
    }

    // --- View inputs ---

    /// Update the zoom factor. Non-positive or non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f64) -> Vec<Action> {
        if !(scale.is_finite() && scale > 0.0) {
            return Vec::new();
        }
        self.camera.scale = scale;
        vec![Action::RenderNeeded]
    }

    /// Record the host's current scroll offset.
    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.camera.scroll = Point::new(x, y);
    }

    /// Update viewport dimensions in viewport pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.camera.viewport_width = width;
        self.camera.viewport_height = height;
    }

    /// Update the rendering surface's backing and displayed sizes.
    pub fn set_surface(&mut self, surface: Surface) {
        self.camera.surface = surface;
    }

    // --- Tool / style / text ---

    /// Set the active tool. Leaving select clears the selection; any open
    /// gesture is abandoned.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let mut actions = Vec::new();
        if tool == self.ui.tool {
            return actions;
        }
        self.abort_gesture(&mut actions);
        self.ui.tool = tool;
        self.ui.hover = None;
        if tool != Tool::Select && self.ui.selection.clear() {
            actions.push(self.selection_changed());
        }
        debug!(?tool, "tool changed");
        actions.push(Action::RenderNeeded);
        if tool.is_click_to_place() {
            actions.push(Action::RequestFrame);
        }
        actions
    }

    /// Set the style applied to new annotations.
    pub fn set_style(&mut self, style: Style) {
        self.ui.style = style;
    }

    /// Commit text from the host editor into the annotation.
    pub fn set_text(&mut self, id: &AnnotationId, text: String) -> Vec<Action> {
        if matches!(self.input, InputState::EditingText { id: editing } if &editing == id) {
            self.input = InputState::Idle;
        }
        let Some(ann) = self.page.get_mut(id) else {
            return Vec::new();
        };
        ann.style.text.text = text;
        vec![Action::AnnotationUpdated(ann.clone()), Action::RenderNeeded]
    }

    /// Close the inline editor without changing the text.
    pub fn cancel_text_edit(&mut self) {
        if matches!(self.input, InputState::EditingText { .. }) {
            self.input = InputState::Idle;
        }
    }

    // --- Pointer input ---

    /// Handle pointer-down at viewport position `screen_pt`.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if button != Button::Primary {
            return actions;
        }
        if let InputState::EditingText { id } = self.input {
            debug!(%id, "pointer-down closes text editor");
            self.input = InputState::Idle;
        }
        if self.input.is_gesture() {
            return actions;
        }

        let baseline = self.camera.baseline();
        let doc = self.camera.pointer_to_document(screen_pt, baseline);
        match self.ui.tool {
            Tool::Select => self.begin_select(doc, baseline, &mut actions),
            Tool::Drag => {
                self.input = InputState::Panning { last_viewport: screen_pt };
                self.set_cursor("grabbing", &mut actions);
            }
            Tool::Draw(AnnotationKind::Freehand) => {
                let preview = self.new_annotation(AnnotationKind::Freehand, vec![doc]);
                self.input =
                    InputState::DrawingFreehand { baseline, preview, last_sample_scroll: self.camera.scroll };
            }
            Tool::Draw(kind) if kind.is_anchored() => self.place_anchored(kind, doc, &mut actions),
            Tool::Draw(kind) => {
                let preview = self.new_annotation(kind, vec![doc, doc]);
                self.input = InputState::DrawingShape { baseline, preview };
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Handle pointer-move at viewport position `screen_pt`.
    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        let state = std::mem::take(&mut self.input);
        self.input = match state {
            InputState::Idle => {
                self.hover(screen_pt, &mut actions);
                InputState::Idle
            }
            InputState::DrawingShape { baseline, mut preview } => {
                let doc = self.camera.pointer_to_document(screen_pt, baseline);
                if let Some(end) = preview.points.get_mut(1) {
                    *end = doc;
                }
                actions.push(Action::RenderNeeded);
                InputState::DrawingShape { baseline, preview }
            }
            InputState::DrawingFreehand { baseline, mut preview, mut last_sample_scroll } => {
                let doc = self.camera.pointer_to_document(screen_pt, baseline);
                let scrolled = self.camera.scroll != last_sample_scroll;
                let far_enough = preview
                    .points
                    .last()
                    .is_none_or(|last| last.distance_to(doc) > self.config.freehand_min_distance);
                if far_enough || scrolled {
                    preview.points.push(doc);
                    last_sample_scroll = self.camera.scroll;
                    actions.push(Action::RenderNeeded);
                }
                InputState::DrawingFreehand { baseline, preview, last_sample_scroll }
            }
            InputState::Selecting { baseline, start, .. } => {
                let current = self.camera.pointer_to_document(screen_pt, baseline);
                let band = Bounds::from_corners(start, current);
                let ids = selection::select_in_band(self.page.as_slice(), &band);
                if self.ui.selection.replace(ids) {
                    actions.push(self.selection_changed());
                }
                actions.push(Action::RenderNeeded);
                InputState::Selecting { baseline, start, current }
            }
            InputState::Moving { baseline, last_doc, originals } => {
                let doc = self.camera.pointer_to_document(screen_pt, baseline);
                let delta = doc - last_doc;
                if delta != Point::default() {
                    let updated = selection::translate_selected(&mut self.page, self.ui.selection.ids(), delta);
                    actions.extend(updated.into_iter().map(Action::AnnotationUpdated));
                    actions.push(Action::RenderNeeded);
                }
                let (vw, vh) = (self.camera.viewport_width, self.camera.viewport_height);
                if self.autoscroll.track(screen_pt, vw, vh, &self.config.autoscroll) {
                    trace!(x = screen_pt.x, y = screen_pt.y, "auto-scroll armed");
                    actions.push(Action::RequestFrame);
                }
                InputState::Moving { baseline, last_doc: doc, originals }
            }
            InputState::Resizing { baseline, id, handle, original } => {
                let doc = self.camera.pointer_to_document(screen_pt, baseline);
                if let Some(next) = selection::resize(&original, handle, doc, modifiers.uniform()) {
                    if self.page.get(&id).is_some() {
                        self.page.upsert(next.clone());
                        actions.push(Action::AnnotationUpdated(next));
                        actions.push(Action::RenderNeeded);
                    }
                }
                InputState::Resizing { baseline, id, handle, original }
            }
            InputState::Panning { last_viewport } => {
                let delta = screen_pt - last_viewport;
                self.scroll_to(self.camera.scroll - delta, &mut actions);
                InputState::Panning { last_viewport: screen_pt }
            }
            editing @ InputState::EditingText { .. } => editing,
        };
        actions
    }

    /// Handle pointer-up: commit drawn annotations, finish move/resize/band.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if button != Button::Primary {
            return actions;
        }
        let state = std::mem::take(&mut self.input);
        match state {
            InputState::DrawingShape { preview, .. } => self.commit(preview, &mut actions),
            InputState::DrawingFreehand { preview, .. } => self.commit_stroke(preview, &mut actions),
            InputState::Moving { .. } => {
                self.autoscroll.release();
                if self.autoscroll.is_running() {
                    actions.push(Action::RequestFrame);
                }
                self.set_cursor("move", &mut actions);
            }
            InputState::Panning { .. } => self.set_cursor("grab", &mut actions),
            InputState::Selecting { .. } | InputState::Resizing { .. } => {}
            other @ (InputState::Idle | InputState::EditingText { .. }) => {
                self.input = other;
                return actions;
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pointer left the surface. A freehand stroke with at least two points
    /// is committed; every other gesture is abandoned.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.ui.hover = None;
        match std::mem::take(&mut self.input) {
            InputState::DrawingFreehand { preview, .. } if preview.points.len() >= 2 => {
                self.commit_stroke(preview, &mut actions);
            }
            other => {
                self.input = other;
                self.abort_gesture(&mut actions);
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Double-click on a text or sticky annotation re-opens its editor.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.tool != Tool::Select || self.input.is_gesture() {
            return actions;
        }
        let doc = self.camera.pointer_to_document(screen_pt, self.camera.baseline());
        let scale = self.camera.scale;
        let Some(target) = hit::hit_test(doc, self.page.as_slice(), scale, self.config.min_hit_buffer) else {
            return actions;
        };
        if !target.kind.is_text_like() {
            return actions;
        }
        let (id, text, anchor) = (target.id, target.style.text.text.clone(), target.anchor());
        if self.ui.selection.set_single(id) {
            actions.push(self.selection_changed());
        }
        self.input = InputState::EditingText { id };
        actions.push(Action::EditTextRequested { id, text, anchor: self.camera.to_viewport(anchor) });
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Keyboard ---

    /// Handle a key press: delete, escape, select-all.
    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if matches!(self.input, InputState::EditingText { .. }) {
            if key.0 == "Escape" {
                self.cancel_text_edit();
            }
            return actions;
        }
        match key.0.as_str() {
            "Escape" if self.input.is_gesture() => self.abort_gesture(&mut actions),
            "Escape" => {
                if self.ui.selection.clear() {
                    actions.push(self.selection_changed());
                }
            }
            "Delete" | "Backspace" if !self.input.is_gesture() => return self.delete_selected(),
            "a" | "A" if modifiers.command() && self.ui.tool == Tool::Select && !self.input.is_gesture() => {
                if self.ui.selection.replace(self.page.ids()) {
                    actions.push(self.selection_changed());
                }
            }
            _ => return actions,
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Deletion ---

    /// Remove one annotation by id.
    pub fn delete_annotation(&mut self, id: &AnnotationId) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.page.remove(id).is_none() {
            return actions;
        }
        if matches!(self.input, InputState::EditingText { id: e } | InputState::Resizing { id: e, .. } if &e == id) {
            self.input = InputState::Idle;
        }
        if self.ui.selection.remove(id) {
            actions.push(self.selection_changed());
        }
        debug!(%id, "annotation deleted");
        actions.push(Action::AnnotationDeleted { id: *id });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove every selected annotation.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let ids = self.ui.selection.ids().to_vec();
        ids.iter().flat_map(|id| self.delete_annotation(id)).collect()
    }

    // --- Animation ---

    /// Advance per-frame work by `elapsed_ms`: auto-scroll and armed-tool preview.
    ///
    /// Emits `RequestFrame` while there is more to animate; the host stops
    /// calling once a batch arrives without it.
    pub fn on_frame(&mut self, elapsed_ms: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.autoscroll.is_running() {
            let delta = self.autoscroll.step(elapsed_ms, &self.config.autoscroll);
            let before = self.camera.scroll;
            self.scroll_to(before + delta, &mut actions);
            let applied = self.camera.scroll - before;
            if applied != Point::default() {
                let doc_delta = self.camera.to_document_space(applied, Point::default());
                if let InputState::Moving { last_doc, .. } = &mut self.input {
                    let updated = selection::translate_selected(&mut self.page, self.ui.selection.ids(), doc_delta);
                    *last_doc = *last_doc + doc_delta;
                    actions.extend(updated.into_iter().map(Action::AnnotationUpdated));
                }
                actions.push(Action::RenderNeeded);
            }
            trace!(vx = self.autoscroll.velocity().x, vy = self.autoscroll.velocity().y, "auto-scroll step");
        }
        let armed = self.ui.tool.is_click_to_place();
        if armed && self.ui.hover.is_some() {
            actions.push(Action::RenderNeeded);
        }
        if self.autoscroll.is_running() || armed {
            actions.push(Action::RequestFrame);
        }
        actions
    }

    /// Stop all background activity. Call when the host component unmounts.
    pub fn teardown(&mut self) {
        self.autoscroll.cancel();
        self.input = InputState::Idle;
        self.ui.hover = None;
    }

    // --- Queries ---

    /// Selected annotation ids, in selection order.
    #[must_use]
    pub fn selection(&self) -> &[AnnotationId] {
        self.ui.selection.ids()
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look up an annotation on the current page.
    #[must_use]
    pub fn annotation(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.page.get(id)
    }

    /// All annotations on the current page in paint order.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        self.page.as_slice()
    }

    // --- Internals ---

    fn new_annotation(&self, kind: AnnotationKind, points: Vec<Point>) -> Annotation {
        let mut ann = Annotation::new(kind, points, self.ui.style.clone(), self.page.page_number());
        ann.author_id = self.author_id;
        ann
    }

    fn selection_changed(&self) -> Action {
        Action::SelectionChanged(self.ui.selection.ids().to_vec())
    }

    fn set_cursor(&mut self, cursor: &'static str, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }

    fn scroll_to(&mut self, scroll: Point, actions: &mut Vec<Action>) {
        let clamped = self.camera.clamp_scroll(scroll);
        if clamped != self.camera.scroll {
            self.camera.scroll = clamped;
            actions.push(Action::ScrollTo { x: clamped.x, y: clamped.y });
        }
    }

    fn begin_select(&mut self, doc: Point, baseline: ScrollBaseline, actions: &mut Vec<Action>) {
        let hit = hit::hit_test_with_selection(
            doc,
            self.page.as_slice(),
            self.ui.selection.ids(),
            self.camera.scale,
            self.config.handle_tolerance_px,
            self.config.min_hit_buffer,
        );
        match hit {
            Some(Hit { annotation_id, part: HitPart::Handle(handle) }) => {
                let Some(original) = self.page.get(&annotation_id).cloned() else {
                    return;
                };
                debug!(id = %annotation_id, ?handle, "resize started");
                self.input = InputState::Resizing { baseline, id: annotation_id, handle, original };
                self.set_cursor(handle.cursor(), actions);
            }
            Some(Hit { annotation_id, part: HitPart::Body }) => {
                if !self.ui.selection.contains(&annotation_id) && self.ui.selection.set_single(annotation_id) {
                    actions.push(self.selection_changed());
                }
                let originals = self
                    .ui
                    .selection
                    .ids()
                    .iter()
                    .filter_map(|id| self.page.get(id).cloned())
                    .collect();
                self.input = InputState::Moving { baseline, last_doc: doc, originals };
                self.autoscroll.engage();
                self.set_cursor("move", actions);
            }
            None => {
                if self.ui.selection.clear() {
                    actions.push(self.selection_changed());
                }
                self.input = InputState::Selecting { baseline, start: doc, current: doc };
            }
        }
    }

    /// Anchored annotations stored without a size take the configured box.
    fn sized(&self, mut annotation: Annotation) -> Annotation {
        if let Some((w, h)) = self.config.box_for(annotation.kind) {
            annotation.width = annotation.width.or(Some(w));
            annotation.height = annotation.height.or(Some(h));
        }
        annotation
    }

    fn place_anchored(&mut self, kind: AnnotationKind, doc: Point, actions: &mut Vec<Action>) {
        let size = self.config.box_for(kind).unwrap_or(self.config.stamp_box);
        let mut ann = Annotation::centered_box(kind, doc, size, self.ui.style.clone(), self.page.page_number());
        ann.author_id = self.author_id;
        let (id, text, anchor) = (ann.id, ann.style.text.text.clone(), ann.anchor());
        self.commit(ann, actions);
        if !kind.is_text_like() {
            return;
        }
        self.ui.tool = Tool::Select;
        self.ui.hover = None;
        actions.push(Action::ToolChanged(Tool::Select));
        if self.ui.selection.set_single(id) {
            actions.push(self.selection_changed());
        }
        self.input = InputState::EditingText { id };
        actions.push(Action::EditTextRequested { id, text, anchor: self.camera.to_viewport(anchor) });
    }

    fn commit(&mut self, annotation: Annotation, actions: &mut Vec<Action>) {
        if annotation.points.is_empty() {
            return;
        }
        debug!(id = %annotation.id, kind = ?annotation.kind, points = annotation.points.len(), "annotation committed");
        self.page.upsert(annotation.clone());
        actions.push(Action::AnnotationCreated(annotation));
    }

    fn commit_stroke(&mut self, stroke: Annotation, actions: &mut Vec<Action>) {
        if stroke.points.len() < 2 {
            debug!(points = stroke.points.len(), "freehand stroke discarded");
            return;
        }
        self.commit(stroke, actions);
    }

    /// Drop the open gesture. Moves and resizes are rolled back to their
    /// pre-gesture geometry; drawn previews are discarded.
    fn abort_gesture(&mut self, actions: &mut Vec<Action>) {
        match std::mem::take(&mut self.input) {
            InputState::Moving { originals, .. } => {
                self.autoscroll.cancel();
                self.restore(originals, actions);
            }
            InputState::Resizing { original, .. } => self.restore(vec![original], actions),
            InputState::DrawingShape { .. } | InputState::DrawingFreehand { .. } => {
                debug!("drawing abandoned");
            }
            InputState::Idle | InputState::Selecting { .. } | InputState::Panning { .. } => {}
            editing @ InputState::EditingText { .. } => self.input = editing,
        }
        actions.push(Action::RenderNeeded);
    }

    fn restore(&mut self, originals: Vec<Annotation>, actions: &mut Vec<Action>) {
        for original in originals {
            if self.page.get(&original.id).is_some() {
                self.page.upsert(original.clone());
                actions.push(Action::AnnotationUpdated(original));
            }
        }
    }

    fn hover(&mut self, screen_pt: Point, actions: &mut Vec<Action>) {
        let doc = self.camera.pointer_to_document(screen_pt, self.camera.baseline());
        if self.ui.tool.is_click_to_place() {
            self.ui.hover = Some(doc);
            actions.push(Action::RenderNeeded);
            return;
        }
        if self.ui.tool != Tool::Select {
            return;
        }
        let cursor = match hit::hit_test_with_selection(
            doc,
            self.page.as_slice(),
            self.ui.selection.ids(),
            self.camera.scale,
            self.config.handle_tolerance_px,
            self.config.min_hit_buffer,
        ) {
            Some(Hit { part: HitPart::Handle(handle), .. }) => handle.cursor(),
            Some(Hit { part: HitPart::Body, .. }) => "move",
            None => "default",
        };
        self.set_cursor(cursor, actions);
    }
}

/// The full annotation engine. Wraps `EngineCore` and owns the overlay canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given overlay canvas, with config from the environment.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::with_config(EngineConfig::from_env()) }
    }

    // --- Delegated data inputs ---

    pub fn load_page(&mut self, page_number: u32, annotations: Vec<Annotation>) {
        self.core.load_page(page_number, annotations);
    }

    pub fn apply_create(&mut self, annotation: Annotation) {
        self.core.apply_create(annotation);
    }

    pub fn apply_update(&mut self, annotation: Annotation) {
        self.core.apply_update(annotation);
    }

    pub fn apply_delete(&mut self, id: &AnnotationId) {
        self.core.apply_delete(id);
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    pub fn set_style(&mut self, style: Style) {
        self.core.set_style(style);
    }

    pub fn set_text(&mut self, id: &AnnotationId, text: String) -> Vec<Action> {
        self.core.set_text(id, text)
    }

    // --- Viewport ---

    /// Update view state from the page renderer.
    pub fn set_view(&mut self, scale: f64, scroll: Point, viewport_w: f64, viewport_h: f64) -> Vec<Action> {
        self.core.set_scroll(scroll.x, scroll.y);
        self.core.set_viewport(viewport_w, viewport_h);
        self.core.set_scale(scale)
    }

    /// Resize the overlay to match the page surface. The backing store is
    /// `display * dpr` pixels.
    pub fn set_surface(&mut self, display_w: f64, display_h: f64, dpr: f64) {
        let surface = Surface {
            backing_width: display_w * dpr,
            backing_height: display_h * dpr,
            display_width: display_w,
            display_height: display_h,
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.canvas.set_width(surface.backing_width.round() as u32);
            self.canvas.set_height(surface.backing_height.round() as u32);
        }
        self.core.set_surface(surface);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_double_click(screen_pt)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_frame(&mut self, elapsed_ms: f64) -> Vec<Action> {
        self.core.on_frame(elapsed_ms)
    }

    pub fn teardown(&mut self) {
        self.core.teardown();
    }

    // --- Render ---

    /// Draw the current state to the overlay canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> &[AnnotationId] {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn annotation(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.core.annotation(id)
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.core.teardown();
    }
}
