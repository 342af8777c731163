//! Pure placement math for newly revealed windows and minimized dock bars.

use super::{Position, Size};

/// Center `window` inside `container`, shifted down-right by `offset` on both
/// axes. The result is clamped to the container origin so a window never
/// starts above or left of it.
pub fn centered_position(container: Size, window: Size, offset: f64) -> Position {
    Position {
        x: ((container.width - window.width) / 2.0 + offset).max(0.0),
        y: ((container.height - window.height) / 2.0 + offset).max(0.0),
    }
}

/// Slot `slot` of the bottom dock.
///
/// Slot 0 is horizontally centered in the viewport; each further slot moves
/// one bar width plus `gap` to the right so bars tile without overlap. The
/// row sits `margin` above the viewport's bottom edge.
pub fn docked_position(viewport: Size, bar: Size, slot: usize, gap: f64, margin: f64) -> Position {
    let pitch = bar.width + gap;
    Position {
        x: (viewport.width - bar.width) / 2.0 + slot as f64 * pitch,
        y: viewport.height - bar.height - margin,
    }
}

/// Diagonal offset for the `ordinal`-th multi-instance window.
///
/// The first instance is already shifted by one `step` so it never sits
/// exactly on top of the singleton window.
pub fn cascade_offset(ordinal: usize, step: f64) -> f64 {
    (ordinal as f64 + 1.0) * step
}
