//! Quit confirmation popup widget.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

use super::popup_area;

pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup = popup_area(area, 36, 6);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Quit ")
        .borders(Borders::ALL)
        .border_style(Styles::help_key());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let content = vec![
        Line::from("Leave the table?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter/y", Styles::group_header()),
            Span::styled(" quit  ", Styles::dim()),
            Span::styled("Esc/n", Styles::group_header()),
            Span::styled(" stay", Styles::dim()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        inner,
    );
}
