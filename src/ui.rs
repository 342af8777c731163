//! Terminal rendering of a [`WindowManager`]: windows bottom-up, then the
//! dock on top.
//!
//! Windows may sit partly or fully outside the screen, so geometry is kept
//! signed until the last moment and clipped per cell.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;

use crate::content::ContentHost;
use crate::layout::Bounds;
use crate::window::WindowManager;
use crate::window::decorator::WindowDecorator;

/// Signed cell rectangle origin with unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    /// Snap pixel-space bounds onto the cell grid, one unit per cell.
    pub fn from_bounds(bounds: Bounds) -> Self {
        let clamp = |v: f64| v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32;
        let size = |v: f64| v.round().clamp(0.0, f64::from(u16::MAX)) as u16;
        Self {
            x: clamp(bounds.origin.x),
            y: clamp(bounds.origin.y),
            width: size(bounds.size.width),
            height: size(bounds.size.height),
        }
    }

    /// Content area inside the chrome: header row on top, one-cell borders
    /// elsewhere.
    pub fn inner(&self) -> FloatRect {
        FloatRect {
            x: self.x + 1,
            y: self.y + 1,
            width: self.width.saturating_sub(2),
            height: self.height.saturating_sub(2),
        }
    }
}

/// Part of `rect` that falls inside `bounds`; empty when fully outside.
pub fn float_rect_visible(rect: FloatRect, bounds: Rect) -> Rect {
    let left = i64::from(rect.x).max(i64::from(bounds.x));
    let top = i64::from(rect.y).max(i64::from(bounds.y));
    let right = (i64::from(rect.x) + i64::from(rect.width))
        .min(i64::from(bounds.x) + i64::from(bounds.width));
    let bottom = (i64::from(rect.y) + i64::from(rect.height))
        .min(i64::from(bounds.y) + i64::from(bounds.height));
    if right <= left || bottom <= top {
        return Rect::default();
    }
    Rect {
        x: left as u16,
        y: top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    }
}

pub fn render_workspace(
    frame: &mut Frame<'_>,
    wm: &WindowManager,
    decorator: &dyn WindowDecorator,
    contents: &mut ContentHost,
) {
    let area = frame.area();
    let button_width = wm.config().button_width.round().clamp(0.0, 64.0) as u16;

    for item in wm.paint_order() {
        let rect = FloatRect::from_bounds(item.bounds);
        let visible = float_rect_visible(rect, area);
        if visible.width == 0 || visible.height == 0 {
            continue;
        }
        frame.render_widget(Clear, visible);
        decorator.render_window(
            frame.buffer_mut(),
            rect,
            area,
            &item.title,
            item.focused,
            button_width,
        );
        let inner = float_rect_visible(rect.inner(), area);
        contents.render(frame, item.id, inner, item.focused);
    }

    for bar in wm.dock_bars() {
        let rect = FloatRect::from_bounds(bar.bounds);
        decorator.render_dock_bar(frame.buffer_mut(), rect, area, &bar.title);
    }
}
