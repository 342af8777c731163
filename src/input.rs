//! Host-agnostic pointer events and the terminal adapter feeding them.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::layout::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A primary-button pointer sample in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Position,
}

impl PointerEvent {
    pub const fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Position::new(x, y),
        }
    }

    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }
}

/// Translate a terminal mouse event; one cell is one unit.
///
/// Only the left button drives windows. Plain motion without a button is
/// reported as a move so a drag survives terminals that drop button state on
/// motion reports.
pub fn pointer_event_from_mouse(mouse: &MouseEvent) -> Option<PointerEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerKind::Move,
        MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
        _ => return None,
    };
    Some(PointerEvent::new(
        kind,
        f64::from(mouse.column),
        f64::from(mouse.row),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn maps_left_button_lifecycle() {
        let down = pointer_event_from_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 4));
        assert_eq!(down, Some(PointerEvent::down(3.0, 4.0)));
        let drag = pointer_event_from_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 5, 4));
        assert_eq!(drag, Some(PointerEvent::moved(5.0, 4.0)));
        let up = pointer_event_from_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 5, 6));
        assert_eq!(up, Some(PointerEvent::up(5.0, 6.0)));
    }

    #[test]
    fn ignores_other_buttons_and_scroll() {
        assert!(
            pointer_event_from_mouse(&mouse(MouseEventKind::Down(MouseButton::Right), 0, 0))
                .is_none()
        );
        assert!(pointer_event_from_mouse(&mouse(MouseEventKind::ScrollUp, 0, 0)).is_none());
    }
}
