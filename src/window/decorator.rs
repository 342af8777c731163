use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::ui::FloatRect;

/// Draws window chrome and dock bars into a cell buffer.
///
/// Rects are signed so a window dragged partly off-screen still draws its
/// visible remainder; anything outside `bounds` is skipped.
pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        buffer: &mut Buffer,
        rect: FloatRect,
        bounds: Rect,
        title: &str,
        focused: bool,
        button_width: u16,
    );

    fn render_dock_bar(&self, buffer: &mut Buffer, rect: FloatRect, bounds: Rect, title: &str);
}

#[derive(Debug, Default)]
pub struct DefaultDecorator;

fn put(buffer: &mut Buffer, bounds: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    let (Ok(cx), Ok(cy)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if cx < bounds.x
        || cy < bounds.y
        || cx >= bounds.x.saturating_add(bounds.width)
        || cy >= bounds.y.saturating_add(bounds.height)
    {
        return;
    }
    if let Some(cell) = buffer.cell_mut((cx, cy)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

fn put_str(buffer: &mut Buffer, bounds: Rect, x: i32, y: i32, text: &str, style: Style) {
    let mut buf = [0u8; 4];
    for (idx, ch) in text.chars().enumerate() {
        put(buffer, bounds, x + idx as i32, y, ch.encode_utf8(&mut buf), style);
    }
}

impl WindowDecorator for DefaultDecorator {
    fn render_window(
        &self,
        buffer: &mut Buffer,
        rect: FloatRect,
        bounds: Rect,
        title: &str,
        focused: bool,
        button_width: u16,
    ) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let header_style = if focused {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        let border_style = Style::default().fg(Color::DarkGray).bg(Color::Reset);

        let left = rect.x;
        let top = rect.y;
        let right = rect.x + i32::from(rect.width) - 1;
        let bottom = rect.y + i32::from(rect.height) - 1;

        // Header row doubles as the top border
        for x in left..=right {
            put(buffer, bounds, x, top, " ", header_style);
        }
        let buttons = i32::from(button_width) * 2;
        let title_room = (right - left + 1 - buttons - 2).max(0) as usize;
        let shown: String = title.chars().take(title_room).collect();
        put_str(buffer, bounds, left + 1, top, &shown, header_style);
        let bw = i32::from(button_width);
        put_str(buffer, bounds, right + 1 - 2 * bw + bw / 2, top, "_", header_style);
        put_str(buffer, bounds, right + 1 - bw + bw / 2, top, "x", header_style);

        for y in (top + 1)..bottom {
            put(buffer, bounds, left, y, "│", border_style);
            put(buffer, bounds, right, y, "│", border_style);
        }
        for x in left..=right {
            let symbol = if x == left {
                "└"
            } else if x == right {
                "┘"
            } else {
                "─"
            };
            put(buffer, bounds, x, bottom, symbol, border_style);
        }
    }

    fn render_dock_bar(&self, buffer: &mut Buffer, rect: FloatRect, bounds: Rect, title: &str) {
        let style = Style::default()
            .bg(Color::Gray)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);
        let right = rect.x + i32::from(rect.width) - 1;
        for y in rect.y..rect.y + i32::from(rect.height) {
            for x in rect.x..=right {
                put(buffer, bounds, x, y, " ", style);
            }
        }
        let room = usize::from(rect.width.saturating_sub(2));
        let shown: String = title.chars().take(room).collect();
        put_str(buffer, bounds, rect.x + 1, rect.y, &shown, style);
    }
}
