pub mod decorator;
pub mod drag;
pub mod registry;
pub mod z_order;

mod window_manager;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::layout::Position;

pub use drag::{DragAnchor, DragController, DragRelease, DragSurface, DragTarget};
pub use registry::WindowRegistry;
pub use window_manager::{DockBar, Hit, HitPart, PaintItem, WindowManager};
pub use z_order::ZOrderStack;

const SEGMENT_ID: &str = "segment";
const PERSONA_PREFIX: &str = "persona-";

/// Identity of a floating window.
///
/// The singleton Segment window has a fixed id; Persona windows carry a
/// sequence number handed out by the registry, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WindowId {
    Segment,
    Persona(u64),
}

impl WindowId {
    pub const fn kind(self) -> WindowKind {
        match self {
            Self::Segment => WindowKind::Segment,
            Self::Persona(_) => WindowKind::Persona,
        }
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Segment => f.write_str(SEGMENT_ID),
            Self::Persona(seq) => write!(f, "{PERSONA_PREFIX}{seq}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid window id: {0:?}")]
pub struct ParseWindowIdError(String);

impl FromStr for WindowId {
    type Err = ParseWindowIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == SEGMENT_ID {
            return Ok(Self::Segment);
        }
        s.strip_prefix(PERSONA_PREFIX)
            .and_then(|seq| seq.parse::<u64>().ok())
            .map(Self::Persona)
            .ok_or_else(|| ParseWindowIdError(s.to_string()))
    }
}

/// Which content collaborator a window hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    Segment,
    Persona,
}

impl WindowKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Segment => "Segment",
            Self::Persona => "Persona",
        }
    }
}

/// One live floating window.
///
/// `position` is canvas-relative and `None` until placement resolves;
/// `minimized_position` is viewport-relative and only meaningful while
/// minimized. Minimizing never touches `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    id: WindowId,
    position: Option<Position>,
    minimized: bool,
    minimized_position: Option<Position>,
}

impl Window {
    pub(crate) fn new(id: WindowId) -> Self {
        Self {
            id,
            position: None,
            minimized: false,
            minimized_position: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn kind(&self) -> WindowKind {
        self.id.kind()
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn minimized_position(&self) -> Option<Position> {
        self.minimized_position
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    pub fn title(&self) -> String {
        match self.id {
            WindowId::Segment => WindowKind::Segment.label().to_string(),
            WindowId::Persona(seq) => format!("{} {seq}", WindowKind::Persona.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_id_round_trips_through_display() {
        assert_eq!(WindowId::Segment.to_string(), "segment");
        assert_eq!(WindowId::Persona(7).to_string(), "persona-7");
        assert_eq!("persona-7".parse::<WindowId>(), Ok(WindowId::Persona(7)));
        assert_eq!("segment".parse::<WindowId>(), Ok(WindowId::Segment));
    }

    #[test]
    fn window_id_rejects_garbage() {
        assert!("persona-".parse::<WindowId>().is_err());
        assert!("persona-x".parse::<WindowId>().is_err());
        assert!("Segment".parse::<WindowId>().is_err());
    }

    #[test]
    fn segment_orders_before_personas() {
        let mut ids = vec![WindowId::Persona(2), WindowId::Segment, WindowId::Persona(1)];
        ids.sort();
        assert_eq!(
            ids,
            vec![WindowId::Segment, WindowId::Persona(1), WindowId::Persona(2)]
        );
    }

    #[test]
    fn titles_follow_kind() {
        assert_eq!(Window::new(WindowId::Segment).title(), "Segment");
        assert_eq!(Window::new(WindowId::Persona(3)).title(), "Persona 3");
    }
}
