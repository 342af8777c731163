pub mod placement;

pub use placement::{cascade_offset, centered_position, docked_position};

use serde::{Deserialize, Serialize};

/// A point in pixels relative to some origin.
///
/// Open windows are positioned relative to the main canvas; minimized dock
/// bars are positioned relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise offset of `self` from `origin`.
    pub fn delta_from(self, origin: Position) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Origin plus size. Containment is half-open: the right and bottom edges
/// belong to the neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub origin: Position,
    pub size: Size,
}

impl Bounds {
    pub const fn new(origin: Position, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.origin.x + self.size.width
            && point.y < self.origin.y + self.size.height
    }

    /// Translate `point` from this rect's parent space into local coordinates.
    pub fn localize(&self, point: Position) -> Position {
        Position::new(point.x - self.origin.x, point.y - self.origin.y)
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contains_is_half_open() {
        let b = Bounds::new(Position::new(10.0, 10.0), Size::new(5.0, 5.0));
        assert!(b.contains(Position::new(10.0, 10.0)));
        assert!(b.contains(Position::new(14.5, 14.9)));
        assert!(!b.contains(Position::new(15.0, 12.0)));
        assert!(!b.contains(Position::new(12.0, 15.0)));
        assert!(!b.contains(Position::new(9.9, 12.0)));
    }

    #[test]
    fn localize_handles_negative_origin() {
        let b = Bounds::new(Position::new(-20.0, 4.0), Size::new(100.0, 50.0));
        let local = b.localize(Position::new(0.0, 10.0));
        assert_eq!(local, Position::new(20.0, 6.0));
    }

    #[test]
    fn size_rejects_degenerate_values() {
        assert!(Size::new(1.0, 1.0).is_positive());
        assert!(!Size::new(0.0, 1.0).is_positive());
        assert!(!Size::new(f64::NAN, 1.0).is_positive());
        assert!(!Size::new(f64::INFINITY, 1.0).is_positive());
    }
}
