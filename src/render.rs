//! Rendering: paints the annotation overlay onto a 2D context.
//!
//! The overlay's backing store matches the page surface's, so one transform
//! of `scale` maps document units onto backing pixels. Nothing here mutates
//! engine state. Fallible `Canvas2D` calls propagate as `Result<(), JsValue>`
//! up to [`crate::engine::Engine::render`].

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::HIGHLIGHT_ALPHA;
use crate::doc::{Annotation, AnnotationKind};
use crate::engine::EngineCore;
use crate::geom::{self, Bounds, Point};
use crate::hit;

/// Arrowhead length, as a multiple of stroke width.
const ARROW_SIZE_FACTOR: f64 = 4.0;
const ARROW_MIN_SIZE: f64 = 8.0;

/// Selection dash segment length in backing pixels.
const SELECTION_DASH_PX: f64 = 4.0;
/// Half the side of a square resize handle, in backing pixels.
const HANDLE_HALF_PX: f64 = 4.0;
const SELECTION_COLOR: &str = "#1E90FF";
const STICKY_FILL: &str = "#FFF59D";
/// Opacity of the armed-tool placement ghost.
const GHOST_ALPHA: f64 = 0.5;

/// Draw the full overlay: committed annotations, the in-progress preview,
/// the rubber band, the placement ghost, and selection chrome.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let scale = core.camera.scale;
    let surface = core.camera.surface;

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, surface.backing_width, surface.backing_height);
    ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)?;

    for ann in core.page.iter() {
        draw_annotation(ctx, ann)?;
    }
    if let Some(preview) = core.input.preview() {
        draw_annotation(ctx, preview)?;
    }
    if let Some(band) = core.input.selection_band() {
        draw_band(ctx, &band, scale)?;
    }
    if let (crate::input::Tool::Draw(kind), Some(hover)) = (core.ui.tool, core.ui.hover) {
        draw_ghost(ctx, core, kind, hover)?;
    }

    let show_handles = core.ui.selection.single().is_some();
    for id in core.ui.selection.ids() {
        if let Some(ann) = core.page.get(id) {
            draw_selection(ctx, ann, scale, show_handles)?;
        }
    }
    Ok(())
}

// =============================================================
// Annotation dispatch
// =============================================================

fn draw_annotation(ctx: &CanvasRenderingContext2d, ann: &Annotation) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(ann.style.opacity);
    ctx.set_stroke_style_str(&ann.style.color);
    ctx.set_line_width(ann.style.stroke_width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    let result = match ann.kind {
        AnnotationKind::Freehand | AnnotationKind::Line => {
            stroke_polyline(ctx, &ann.points, false);
            Ok(())
        }
        AnnotationKind::Arrow | AnnotationKind::DoubleArrow => {
            draw_arrow(ctx, ann);
            Ok(())
        }
        AnnotationKind::Rectangle => {
            let b = geom::bounds(&ann.points);
            ctx.stroke_rect(b.left, b.top, b.width(), b.height());
            Ok(())
        }
        AnnotationKind::Circle => draw_circle(ctx, ann),
        AnnotationKind::Triangle => {
            stroke_polyline(ctx, &geom::triangle_vertices(&geom::bounds(&ann.points)), true);
            Ok(())
        }
        AnnotationKind::Star => {
            stroke_polyline(ctx, &geom::star_vertices(&geom::bounds(&ann.points)), true);
            Ok(())
        }
        AnnotationKind::Highlight => {
            let b = geom::highlight_box(ann);
            ctx.set_global_alpha(ann.style.opacity * HIGHLIGHT_ALPHA);
            ctx.set_fill_style_str(&ann.style.color);
            ctx.fill_rect(b.left, b.top, b.width(), b.height());
            Ok(())
        }
        AnnotationKind::Text => draw_text(ctx, ann, &geom::anchored_box(ann)),
        AnnotationKind::StickyNote => {
            let b = geom::anchored_box(ann);
            ctx.set_fill_style_str(STICKY_FILL);
            ctx.fill_rect(b.left, b.top, b.width(), b.height());
            ctx.set_line_width(1.0);
            ctx.stroke_rect(b.left, b.top, b.width(), b.height());
            draw_text(ctx, ann, &b.expand(-6.0))
        }
        kind => draw_stamp(ctx, ann, kind.stamp_label().unwrap_or_default()),
    };
    ctx.restore();
    result
}

// =============================================================
// Shape renderers
// =============================================================

fn stroke_polyline(ctx: &CanvasRenderingContext2d, points: &[Point], closed: bool) {
    let [first, rest @ ..] = points else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    if closed {
        ctx.close_path();
    }
    ctx.stroke();
}

fn draw_arrow(ctx: &CanvasRenderingContext2d, ann: &Annotation) {
    let [a, b, ..] = ann.points.as_slice() else {
        return;
    };
    stroke_polyline(ctx, &[*a, *b], false);
    let size = (ann.style.stroke_width * ARROW_SIZE_FACTOR).max(ARROW_MIN_SIZE);
    draw_arrowhead(ctx, *a, *b, size);
    if ann.kind == AnnotationKind::DoubleArrow {
        draw_arrowhead(ctx, *b, *a, size);
    }
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, tail: Point, tip: Point, size: f64) {
    let [tip, left, right] = geom::arrowhead_points(tail, tip, size);
    ctx.begin_path();
    ctx.move_to(left.x, left.y);
    ctx.line_to(tip.x, tip.y);
    ctx.line_to(right.x, right.y);
    ctx.stroke();
}

fn draw_circle(ctx: &CanvasRenderingContext2d, ann: &Annotation) -> Result<(), JsValue> {
    let Some((c, r)) = geom::circle_geometry(ann) else {
        return Ok(());
    };
    ctx.begin_path();
    ctx.arc(c.x, c.y, r, 0.0, 2.0 * PI)?;
    ctx.stroke();
    Ok(())
}

fn draw_stamp(ctx: &CanvasRenderingContext2d, ann: &Annotation, label: &str) -> Result<(), JsValue> {
    let b = geom::anchored_box(ann);
    ctx.stroke_rect(b.left, b.top, b.width(), b.height());
    let c = b.center();
    let font_size = (b.height() * 0.45).max(8.0);
    ctx.set_fill_style_str(&ann.style.color);
    ctx.set_font(&format!("bold {font_size}px sans-serif"));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text_with_max_width(label, c.x, c.y, (b.width() - 8.0).max(1.0))
}

fn draw_text(ctx: &CanvasRenderingContext2d, ann: &Annotation, b: &Bounds) -> Result<(), JsValue> {
    let opts = &ann.style.text;
    if opts.text.is_empty() {
        return Ok(());
    }
    ctx.set_fill_style_str(&ann.style.color);
    ctx.set_font(&opts.css_font());
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");

    let line_height = opts.font_size * 1.25;
    let mut y = b.top;
    for line in wrap_lines(ctx, &opts.text, b.width()) {
        if y + opts.font_size > b.bottom {
            break;
        }
        ctx.fill_text(&line, b.left, y)?;
        y += line_height;
    }
    Ok(())
}

/// Greedy word wrap against measured widths. Explicit newlines always break.
fn wrap_lines(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> Vec<String> {
    let mut out = Vec::new();
    for raw in text.lines() {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let candidate = if current.is_empty() { word.to_owned() } else { format!("{current} {word}") };
            if !current.is_empty() && text_width(ctx, &candidate) > max_w {
                out.push(std::mem::replace(&mut current, word.to_owned()));
            } else {
                current = candidate;
            }
        }
        out.push(current);
    }
    out
}

fn text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    ctx.measure_text(text).map_or(f64::INFINITY, |m| m.width())
}

// =============================================================
// Gesture feedback
// =============================================================

fn set_dash(ctx: &CanvasRenderingContext2d, dash: f64) -> Result<(), JsValue> {
    let pattern = js_sys::Array::new();
    if dash > 0.0 {
        pattern.push(&dash.into());
        pattern.push(&dash.into());
    }
    ctx.set_line_dash(&pattern)
}

fn draw_band(ctx: &CanvasRenderingContext2d, band: &Bounds, scale: f64) -> Result<(), JsValue> {
    ctx.save();
    set_dash(ctx, SELECTION_DASH_PX / scale)?;
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_fill_style_str("rgba(30, 144, 255, 0.12)");
    ctx.set_line_width(1.0 / scale);
    ctx.fill_rect(band.left, band.top, band.width(), band.height());
    ctx.stroke_rect(band.left, band.top, band.width(), band.height());
    ctx.restore();
    Ok(())
}

/// Translucent outline of the box a click-to-place tool would drop at `hover`.
fn draw_ghost(ctx: &CanvasRenderingContext2d, core: &EngineCore, kind: AnnotationKind, hover: Point) -> Result<(), JsValue> {
    let (w, h) = match kind {
        AnnotationKind::Text => core.config.text_box,
        AnnotationKind::StickyNote => core.config.sticky_box,
        kind if kind.is_stamp() => core.config.stamp_box,
        _ => return Ok(()),
    };
    let scale = core.camera.scale;
    ctx.save();
    ctx.set_global_alpha(GHOST_ALPHA);
    set_dash(ctx, SELECTION_DASH_PX / scale)?;
    ctx.set_stroke_style_str(&core.ui.style.color);
    ctx.set_line_width(1.0 / scale);
    ctx.stroke_rect(hover.x - w * 0.5, hover.y - h * 0.5, w, h);
    ctx.restore();
    Ok(())
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, ann: &Annotation, scale: f64, show_handles: bool) -> Result<(), JsValue> {
    let b = geom::shape_bounds(ann);
    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0 / scale);
    set_dash(ctx, SELECTION_DASH_PX / scale)?;
    if ann.kind == AnnotationKind::Circle {
        if let Some((c, r)) = geom::circle_geometry(ann) {
            ctx.begin_path();
            ctx.arc(c.x, c.y, r, 0.0, 2.0 * PI)?;
            ctx.stroke();
        }
    } else {
        ctx.stroke_rect(b.left, b.top, b.width(), b.height());
    }
    set_dash(ctx, 0.0)?;

    if show_handles {
        let half = HANDLE_HALF_PX / scale;
        ctx.set_fill_style_str("#fff");
        for (_, pos) in hit::handle_positions(ann) {
            ctx.fill_rect(pos.x - half, pos.y - half, half * 2.0, half * 2.0);
            ctx.stroke_rect(pos.x - half, pos.y - half, half * 2.0, half * 2.0);
        }
    }
    ctx.restore();
    Ok(())
}
