use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn tool_parses_host_names() {
    assert_eq!("select".parse::<Tool>(), Ok(Tool::Select));
    assert_eq!("drag".parse::<Tool>(), Ok(Tool::Drag));
    assert_eq!("doubleArrow".parse::<Tool>(), Ok(Tool::Draw(AnnotationKind::DoubleArrow)));
    assert_eq!("stampApproved".parse::<Tool>(), Ok(Tool::Draw(AnnotationKind::StampApproved)));
}

#[test]
fn tool_rejects_unknown_names() {
    assert_eq!("lasso".parse::<Tool>(), Err(UnknownTool("lasso".into())));
    assert_eq!(UnknownTool("lasso".into()).to_string(), "unknown tool: lasso");
}

#[test]
fn click_to_place_tools() {
    assert!(Tool::Draw(AnnotationKind::Text).is_click_to_place());
    assert!(Tool::Draw(AnnotationKind::StickyNote).is_click_to_place());
    assert!(Tool::Draw(AnnotationKind::StampFinal).is_click_to_place());
    assert!(!Tool::Draw(AnnotationKind::Rectangle).is_click_to_place());
    assert!(!Tool::Select.is_click_to_place());
}

#[test]
fn drag_to_draw_tools() {
    assert!(Tool::Draw(AnnotationKind::Circle).is_drag_to_draw());
    assert!(Tool::Draw(AnnotationKind::Highlight).is_drag_to_draw());
    assert!(!Tool::Draw(AnnotationKind::Freehand).is_drag_to_draw());
    assert!(!Tool::Draw(AnnotationKind::Stamp).is_drag_to_draw());
    assert!(!Tool::Drag.is_drag_to_draw());
}

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_none() {
    let m = Modifiers::default();
    assert!(!m.uniform());
    assert!(!m.command());
}

#[test]
fn command_is_ctrl_or_meta() {
    assert!(Modifiers { ctrl: true, ..Default::default() }.command());
    assert!(Modifiers { meta: true, ..Default::default() }.command());
    assert!(!Modifiers { alt: true, ..Default::default() }.command());
}

#[test]
fn shift_requests_uniform_resize() {
    assert!(Modifiers { shift: true, ..Default::default() }.uniform());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn idle_and_editing_are_not_gestures() {
    assert!(!InputState::Idle.is_gesture());
    assert!(!InputState::EditingText { id: uuid::Uuid::new_v4() }.is_gesture());
    assert!(InputState::Panning { last_viewport: Point::default() }.is_gesture());
}

#[test]
fn selection_band_normalizes_corners() {
    let state = InputState::Selecting {
        baseline: ScrollBaseline::default(),
        start: Point::new(50.0, 40.0),
        current: Point::new(10.0, 60.0),
    };
    let band = state.selection_band();
    assert_eq!(band, Some(Bounds { left: 10.0, right: 50.0, top: 40.0, bottom: 60.0 }));
    assert!(InputState::Idle.selection_band().is_none());
}

#[test]
fn preview_only_while_drawing() {
    let preview = Annotation::new(AnnotationKind::Line, vec![Point::default(); 2], Style::default(), 1);
    let drawing = InputState::DrawingShape { baseline: ScrollBaseline::default(), preview: preview.clone() };
    assert_eq!(drawing.preview(), Some(&preview));
    assert!(InputState::Idle.preview().is_none());
}
