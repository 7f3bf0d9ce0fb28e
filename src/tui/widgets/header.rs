//! Title bar.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::pagination::PaginationMode;
use crate::tui::style::Styles;

/// Renders the title bar: clock, title and pagination mode.
pub fn render_header(frame: &mut Frame, area: Rect, title: &str, mode: PaginationMode) {
    let chunks = Layout::horizontal([
        Constraint::Length(10), // Time
        Constraint::Min(10),    // Title
        Constraint::Length(12), // Mode
    ])
    .split(area);

    let time = Paragraph::new(Local::now().format(" %H:%M:%S").to_string()).style(Styles::header());
    frame.render_widget(time, chunks[0]);

    frame.render_widget(Paragraph::new(title.to_string()).style(Styles::header()), chunks[1]);

    let mode = match mode {
        PaginationMode::Client => " CLIENT ",
        PaginationMode::External => " EXTERNAL ",
    };
    frame.render_widget(Paragraph::new(mode).style(Styles::header()), chunks[2]);
}
