//! Floating popup window manager.
//!
//! [`window::WindowManager`] owns every product window (the singleton
//! Segment window and any number of Persona windows): their lifecycle,
//! z-order, header dragging, first placement and minimize-to-dock. Hosts
//! report measurements and pointer events, then read back paint order and
//! dock bars. [`ui`] is a ready-made terminal renderer for it.

pub mod config;
pub mod constants;
pub mod content;
pub mod events;
pub mod input;
pub mod layout;
pub mod state;
pub mod tracing_sub;
pub mod ui;
pub mod window;

pub use config::{ConfigError, WmConfig};
pub use events::WmEvent;
pub use layout::{Bounds, Position, Size};
pub use window::{WindowId, WindowKind, WindowManager};
