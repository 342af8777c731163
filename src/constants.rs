//! Shared crate-wide constants.

/// Width and height of a product window's footprint, in pixels. Used to
/// center windows on first reveal.
pub const WINDOW_WIDTH: f64 = 1450.0;
pub const WINDOW_HEIGHT: f64 = 730.0;

/// Diagonal step between successive Persona windows so several opened in a
/// row do not stack exactly on top of each other.
pub const CASCADE_STEP: f64 = 50.0;

/// Size of a minimized window's dock bar.
pub const DOCK_BAR_WIDTH: f64 = 320.0;
pub const DOCK_BAR_HEIGHT: f64 = 48.0;

/// Horizontal gap between neighbouring dock bars. Together with the bar
/// width this is the dock pitch.
pub const DOCK_GAP: f64 = 30.0;

/// Distance between the dock row and the bottom edge of the viewport.
pub const DOCK_MARGIN: f64 = 20.0;

/// Height of the draggable header strip at the top of a window.
pub const HEADER_HEIGHT: f64 = 32.0;

/// Width of each header button (minimize, close), anchored at the right.
pub const BUTTON_WIDTH: f64 = 32.0;

/// Paint layer of the topmost window. Keep it above the number of windows
/// that can be open at once: layers count down from here and bottom out at 1,
/// where deeper windows share a layer.
pub const BASE_Z: i32 = 1000;
