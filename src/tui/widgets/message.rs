//! Loading and error messages shown in place of the table.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::style::Styles;

pub fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, style: Style) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .style(Styles::default());
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    // Vertically centered.
    let message_area = Rect {
        y: inner.y + inner.height / 2,
        height: inner.height - inner.height / 2,
        ..inner
    };
    let paragraph = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .style(style)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, message_area);
}
