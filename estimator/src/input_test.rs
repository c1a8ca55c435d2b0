use super::*;

// =============================================================
// Button
// =============================================================

#[test]
fn only_primary_is_primary() {
    assert_eq!(Button::Primary, Button::Primary);
    assert_ne!(Button::Other, Button::Primary);
}

// =============================================================
// Cursor
// =============================================================

#[test]
fn cursor_css_keywords() {
    assert_eq!(Cursor::Default.css(), "default");
    assert_eq!(Cursor::Grab.css(), "grab");
    assert_eq!(Cursor::Grabbing.css(), "grabbing");
}

// =============================================================
// DragState
// =============================================================

#[test]
fn drag_state_default_is_idle() {
    let s = DragState::default();
    assert_eq!(s, DragState::Idle);
    assert!(!s.is_dragging());
    assert_eq!(s.opening(), None);
}

#[test]
fn dragging_reports_opening() {
    let s = DragState::DraggingOpening { id: 4, panel: 1, grab: Point::new(0.1, 0.2) };
    assert!(s.is_dragging());
    assert_eq!(s.opening(), Some(4));
}

#[test]
fn drag_state_debug_names_variant() {
    let s = DragState::DraggingOpening { id: 1, panel: 0, grab: Point::new(0.0, 0.0) };
    assert!(format!("{s:?}").contains("DraggingOpening"));
}
