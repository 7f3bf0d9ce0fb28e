//! Help popup widget.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

use super::popup_area;

const KEYS: &[(&str, &str)] = &[
    ("↑ ↓ / j k", "Move between rows"),
    ("← → / Tab", "Move between cells"),
    ("Home / End", "First / last row on the page"),
    ("Enter / Space", "Toggle, edit the cell, or press the action"),
    ("n / PgDn / ]", "Next page"),
    ("p / PgUp / [", "Previous page"),
    ("+ / -", "Next / previous page size"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

const EDITOR_KEYS: &[(&str, &str)] = &[
    ("Enter", "Save (new line in multi-line text)"),
    ("Ctrl+S", "Save multi-line text"),
    ("← → / PgUp PgDn", "Step sliders, ratings, dates, times"),
    ("Esc", "Discard the edit"),
];

pub fn render_help(frame: &mut Frame, area: Rect) {
    let height = (KEYS.len() + EDITOR_KEYS.len() + 5) as u16;
    let popup = popup_area(area, 64, height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Styles::help_key());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = vec![Line::from(Span::styled("Table", Styles::group_header()))];
    lines.extend(KEYS.iter().map(|&(k, d)| key_line(k, d)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Editor", Styles::group_header())));
    lines.extend(EDITOR_KEYS.iter().map(|&(k, d)| key_line(k, d)));
    frame.render_widget(Paragraph::new(lines), inner);
}

fn key_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", key), Styles::help_key()),
        Span::raw(description),
    ])
}
