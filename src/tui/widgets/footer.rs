//! Pagination footer and key hints.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::style::Styles;
use crate::view::PaginationFooter;

/// Renders "Rows per page", the range summary and prev/next indicators.
pub fn render_footer(frame: &mut Frame, area: Rect, footer: &PaginationFooter) {
    let chunks = Layout::horizontal([Constraint::Min(20), Constraint::Length(32)]).split(area);

    frame.render_widget(Paragraph::new(page_size_line(footer)), chunks[0]);
    frame.render_widget(
        Paragraph::new(range_line(footer)).alignment(Alignment::Right),
        chunks[1],
    );
}

fn page_size_line(footer: &PaginationFooter) -> Line<'static> {
    let mut spans = vec![Span::styled("Rows per page: ", Styles::dim())];
    for (i, size) in footer.page_size_options.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if *size == footer.page_size {
            Styles::help_key()
        } else {
            Styles::dim()
        };
        spans.push(Span::styled(size.to_string(), style));
    }
    Line::from(spans)
}

fn range_line(footer: &PaginationFooter) -> Line<'static> {
    let arrow = |enabled: bool, text: &'static str| {
        if enabled {
            Span::styled(text, Styles::help_key())
        } else {
            Span::styled(text, Styles::dim())
        }
    };
    Line::from(vec![
        Span::raw(footer.summary.to_string()),
        Span::raw("  "),
        arrow(footer.has_prev, "‹"),
        Span::raw(" "),
        arrow(footer.has_next, "›"),
        Span::raw(" "),
    ])
}

/// Renders the key hint line, or the status message while one is shown.
pub fn render_help_line(frame: &mut Frame, area: Rect, status: Option<&str>) {
    let line = match status {
        Some(message) => Line::from(Span::styled(message.to_string(), Styles::default())),
        None => {
            let hints = [
                ("↑↓←→", "move"),
                ("Enter", "edit/press"),
                ("n/p", "page"),
                ("+/-", "page size"),
                ("?", "help"),
                ("q", "quit"),
            ];
            let mut spans = Vec::new();
            for (key, what) in hints {
                spans.push(Span::styled(format!(" {}", key), Styles::help_key()));
                spans.push(Span::styled(format!(" {} ", what), Styles::dim()));
            }
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
