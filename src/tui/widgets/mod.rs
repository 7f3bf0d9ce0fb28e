//! TUI widgets for tabview.

mod editor;
mod footer;
mod header;
mod help;
mod message;
mod quit_confirm;
pub mod table;

use ratatui::layout::Rect;

pub use editor::render_editor;
pub use footer::{render_footer, render_help_line};
pub use header::render_header;
pub use help::render_help;
pub use message::render_message;
pub use quit_confirm::render_quit_confirm;
pub use table::render_table;

/// Centered popup rect of at most `width` x `height` inside `area`.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
