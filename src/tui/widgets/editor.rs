//! Cell editor popup.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::control::{RATING_MAX, SelectEntry};
use crate::fmt::{format_rating, format_slider, format_value};
use crate::tui::editor::{Editor, EditorKind, StepKind};
use crate::tui::style::Styles;

use super::popup_area;

const SLIDER_WIDTH: usize = 20;

pub fn render_editor(frame: &mut Frame, area: Rect, editor: &Editor) {
    let (lines, hint) = match &editor.kind {
        EditorKind::Text {
            buffer, multiline, ..
        } => {
            let mut lines: Vec<Line> = buffer.split('\n').map(|l| Line::from(l.to_string())).collect();
            if let Some(last) = lines.last_mut() {
                last.push_span(Span::styled("▏", Styles::help_key()));
            }
            let hint = if *multiline {
                "Enter newline  Ctrl+S save  Esc cancel"
            } else {
                "Enter save  Esc cancel"
            };
            (lines, hint)
        }
        EditorKind::Choice { entries, cursor } => {
            let lines = entries
                .iter()
                .enumerate()
                .map(|(i, entry)| choice_line(entry, i == *cursor))
                .collect();
            (lines, "↑↓ choose  Enter select  Esc cancel")
        }
        EditorKind::Stepper { value, step } => {
            let text = match step {
                StepKind::Slider => format_slider(value, SLIDER_WIDTH),
                StepKind::Rating => format_rating(value, RATING_MAX),
                StepKind::Date | StepKind::Time => format_value(value),
            };
            (
                vec![Line::from(Span::styled(text, Styles::control()))],
                "←→ step  PgUp/PgDn ×10  Enter save  Esc cancel",
            )
        }
    };

    let height = (lines.len() as u16).clamp(1, 16) + 4;
    let popup = popup_area(area, 50, height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", editor.title()))
        .borders(Borders::ALL)
        .border_style(Styles::help_key());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);
    frame.render_widget(Paragraph::new(hint).style(Styles::dim()), chunks[1]);
}

fn choice_line(entry: &SelectEntry, is_cursor: bool) -> Line<'static> {
    match entry {
        SelectEntry::GroupHeader(name) => Line::from(Span::styled(name.clone(), Styles::group_header())),
        SelectEntry::Option {
            label, disabled, ..
        } => {
            let style = if is_cursor {
                Styles::cursor()
            } else if *disabled {
                Styles::dim()
            } else {
                Styles::default()
            };
            Line::from(vec![Span::raw("  "), Span::styled(label.clone(), style)])
        }
    }
}
