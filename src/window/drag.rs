//! Pointer drag state machine shared by every window and dock bar.
//!
//! Only one drag can be in flight at a time. The controller only computes
//! positions; the window manager applies them to the registry and takes care
//! of the side effects (raising the window, text-selection suppression).

use super::WindowId;
use crate::layout::Position;

/// Which of a window's two positions a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragSurface {
    /// The open window, moved by its header. Canvas coordinates.
    Window,
    /// The minimized bar in the dock. Viewport coordinates.
    DockBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragTarget {
    pub id: WindowId,
    pub surface: DragSurface,
}

impl DragTarget {
    pub const fn window(id: WindowId) -> Self {
        Self {
            id,
            surface: DragSurface::Window,
        }
    }

    pub const fn dock_bar(id: WindowId) -> Self {
        Self {
            id,
            surface: DragSurface::DockBar,
        }
    }
}

/// Pointer and element positions captured at grab time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub pointer: Position,
    pub element: Position,
}

impl DragAnchor {
    /// Element position for the current pointer. Depends only on the
    /// pointer's total displacement, never on the path it took.
    pub fn project(&self, pointer: Position) -> Position {
        let (dx, dy) = pointer.delta_from(self.pointer);
        self.element.offset(dx, dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    target: DragTarget,
    anchor: DragAnchor,
    moved: bool,
}

/// Outcome of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragRelease {
    pub target: DragTarget,
    /// At least one pointer move arrived while dragging. A release with
    /// `moved == false` is a plain click.
    pub moved: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Enter the dragging state. A drag already in progress is replaced.
    pub fn begin(&mut self, target: DragTarget, pointer: Position, element: Position) {
        if let Some(prev) = self.active {
            tracing::debug!(target_id = %prev.target.id, "drag superseded before release");
        }
        self.active = Some(ActiveDrag {
            target,
            anchor: DragAnchor { pointer, element },
            moved: false,
        });
    }

    /// Position the target should take for this pointer sample, or `None`
    /// while idle.
    pub fn update(&mut self, pointer: Position) -> Option<(DragTarget, Position)> {
        let drag = self.active.as_mut()?;
        drag.moved = true;
        Some((drag.target, drag.anchor.project(pointer)))
    }

    /// Leave the dragging state, wherever the pointer is.
    pub fn end(&mut self) -> Option<DragRelease> {
        self.active.take().map(|drag| DragRelease {
            target: drag.target,
            moved: drag.moved,
        })
    }

    /// Drop the drag without reporting a release, used when the target
    /// window disappears mid-drag.
    pub fn abandon_if_targets(&mut self, id: WindowId) -> bool {
        if self.active.is_some_and(|drag| drag.target.id == id) {
            self.active = None;
            return true;
        }
        false
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn target(&self) -> Option<DragTarget> {
        self.active.map(|drag| drag.target)
    }

    pub fn has_moved(&self) -> bool {
        self.active.is_some_and(|drag| drag.moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: WindowId = WindowId::Persona(1);

    #[test]
    fn idle_controller_ignores_moves_and_release() {
        let mut drag = DragController::new();
        assert!(drag.update(Position::new(5.0, 5.0)).is_none());
        assert!(drag.end().is_none());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn moves_follow_pointer_delta_from_anchor() {
        let mut drag = DragController::new();
        drag.begin(
            DragTarget::window(ID),
            Position::new(100.0, 100.0),
            Position::new(275.0, 135.0),
        );
        let (target, pos) = drag.update(Position::new(130.0, 90.0)).unwrap();
        assert_eq!(target, DragTarget::window(ID));
        assert_eq!(pos, Position::new(305.0, 125.0));
    }

    #[test]
    fn final_position_is_path_independent() {
        let start = Position::new(10.0, 20.0);
        let element = Position::new(300.0, 200.0);
        let end = Position::new(-45.0, 260.0);

        let mut coarse = DragController::new();
        coarse.begin(DragTarget::window(ID), start, element);
        let (_, direct) = coarse.update(end).unwrap();

        let mut fine = DragController::new();
        fine.begin(DragTarget::window(ID), start, element);
        let mut last = element;
        for step in 1..=37 {
            let t = f64::from(step) / 37.0;
            let wobble = if step % 2 == 0 { 13.0 } else { -7.0 };
            let sample = Position::new(
                start.x + (end.x - start.x) * t + wobble,
                start.y + (end.y - start.y) * t - wobble,
            );
            last = fine.update(sample).unwrap().1;
        }
        last = fine.update(end).map_or(last, |(_, p)| p);

        assert_eq!(direct, Position::new(245.0, 440.0));
        assert_eq!(last, direct);
    }

    #[test]
    fn release_reports_whether_pointer_moved() {
        let mut drag = DragController::new();
        drag.begin(DragTarget::dock_bar(ID), Position::default(), Position::default());
        let click = drag.end().unwrap();
        assert!(!click.moved);

        drag.begin(DragTarget::dock_bar(ID), Position::default(), Position::default());
        drag.update(Position::new(1.0, 0.0));
        assert!(drag.has_moved());
        let moved = drag.end().unwrap();
        assert!(moved.moved);
        assert_eq!(moved.target.surface, DragSurface::DockBar);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn abandon_only_matches_current_target() {
        let mut drag = DragController::new();
        drag.begin(DragTarget::window(ID), Position::default(), Position::default());
        assert!(!drag.abandon_if_targets(WindowId::Segment));
        assert!(drag.is_dragging());
        assert!(drag.abandon_if_targets(ID));
        assert!(!drag.is_dragging());
    }
}
