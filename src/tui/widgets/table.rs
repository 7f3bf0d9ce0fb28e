//! Table widget: maps a [`TableViewModel`] onto a ratatui table.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};

use crate::control::{Control, ControlKind, RATING_MAX};
use crate::dispatch::{Cell, CellContent};
use crate::fmt::{format_rating, format_slider, format_value, truncate};
use crate::tui::state::AppState;
use crate::tui::style::Styles;
use crate::view::{BodyRow, HeaderCell, TableBody, TableViewModel, ViewCell};

const MIN_WIDTH: usize = 3;
const MAX_WIDTH: usize = 32;
const SLIDER_WIDTH: usize = 10;

/// Renders the table body with its header row.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    vm: &TableViewModel,
    title: &str,
) {
    let header_labels = expand_headers(&vm.headers);
    let header = Row::new(
        header_labels
            .iter()
            .map(|h| Span::styled(h.clone(), Styles::table_header())),
    )
    .style(Styles::table_header())
    .height(1);

    let body_rows: &[BodyRow] = match &vm.body {
        TableBody::Rows(rows) => rows,
        TableBody::Empty { .. } => &[],
    };
    let texts: Vec<Vec<(String, Style)>> = body_rows.iter().map(row_display).collect();

    let rows: Vec<Row> = texts
        .iter()
        .enumerate()
        .map(|(idx, cells)| {
            let is_selected = idx == state.cursor_row;
            let cells = cells.iter().enumerate().map(|(col, (text, style))| {
                let style = if is_selected && col == state.cursor_col {
                    style.patch(Styles::cursor())
                } else {
                    *style
                };
                Span::styled(text.clone(), style)
            });
            let row = Row::new(cells).height(1);
            if is_selected {
                row.style(Styles::selected())
            } else {
                row
            }
        })
        .collect();

    let mut constraints: Vec<Constraint> = column_widths(&header_labels, &texts)
        .into_iter()
        .map(|w| Constraint::Length(w as u16))
        .collect();
    constraints.push(Constraint::Fill(1));

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .style(Styles::default());
    let inner = block.inner(area);

    let table = Table::new(rows, constraints)
        .header(header)
        .block(block)
        .column_spacing(1);

    if !body_rows.is_empty() {
        state.table_state.select(Some(state.cursor_row));
    } else {
        state.table_state.select(None);
    }

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(table, area, &mut state.table_state);

    if let TableBody::Empty { content, .. } = &vm.body {
        // The placeholder spans the whole width below the header row.
        let placeholder_area = Rect {
            y: inner.y.saturating_add(1),
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let placeholder = Paragraph::new(content.as_str())
            .alignment(Alignment::Center)
            .style(Styles::placeholder());
        frame.render_widget(placeholder, placeholder_area);
    }
}

/// One label per body cell: a spanning header is followed by blanks.
pub fn expand_headers(headers: &[HeaderCell]) -> Vec<String> {
    let mut labels = Vec::new();
    for header in headers {
        labels.push(header.label.clone());
        labels.extend(std::iter::repeat_n(String::new(), header.span.saturating_sub(1)));
    }
    labels
}

fn column_widths(headers: &[String], rows: &[Vec<(String, Style)>]) -> Vec<usize> {
    let count = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    (0..count)
        .map(|i| {
            let header = headers.get(i).map(|h| h.chars().count()).unwrap_or(0);
            rows.iter()
                .filter_map(|cells| cells.get(i))
                .map(|(text, _)| text.chars().count())
                .fold(header, usize::max)
                .clamp(MIN_WIDTH, MAX_WIDTH)
        })
        .collect()
}

fn row_display(row: &BodyRow) -> Vec<(String, Style)> {
    match row {
        BodyRow::Rendered(row) => row.cells.iter().map(cell_display).collect(),
        BodyRow::Failed { index, reason } => {
            vec![(format!("! row {}: {}", index, reason), Styles::error())]
        }
    }
}

/// Display text and style of one body cell.
pub fn cell_display(cell: &ViewCell) -> (String, Style) {
    match cell {
        ViewCell::Field { cell, .. } => match cell {
            Cell::Static(value) => (single_line(&format_value(value)), Styles::default()),
            Cell::Custom(CellContent::Text(text)) => (single_line(text), Styles::default()),
            Cell::Control(control) | Cell::Custom(CellContent::Control(control)) => {
                control_display(control)
            }
        },
        ViewCell::Action(button) => (format!("[{}]", button.label()), Styles::action()),
    }
}

/// Display text and style of an interactive control.
pub fn control_display(control: &Control) -> (String, Style) {
    let value = control.value();
    match control.kind() {
        ControlKind::Toggle => {
            let mark = if value.as_bool().unwrap_or(false) { "[x]" } else { "[ ]" };
            (mark.to_string(), Styles::control())
        }
        ControlKind::Slider => (format_slider(value, SLIDER_WIDTH), Styles::control()),
        ControlKind::Rating => (format_rating(value, RATING_MAX), Styles::rating()),
        ControlKind::ColorPicker => {
            let hex = format_value(value);
            let style = Styles::swatch(&hex).unwrap_or_else(Styles::control);
            (format!("■ {}", hex), style)
        }
        ControlKind::Select(_) => {
            let text = control
                .selected_label()
                .map(str::to_string)
                .unwrap_or_else(|| format_value(value));
            (format!("{} ▾", text), Styles::control())
        }
        ControlKind::TextArea => (
            truncate(&single_line(&format_value(value)), MAX_WIDTH),
            Styles::control(),
        ),
        ControlKind::NumberInput
        | ControlKind::DatePicker
        | ControlKind::TimePicker
        | ControlKind::TextInput => (single_line(&format_value(value)), Styles::control()),
    }
}

fn single_line(text: &str) -> String {
    text.replace('\n', "⏎")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ChangeHandler, SelectEntry};
    use serde_json::{Value, json};

    fn control(kind: ControlKind, value: Value) -> Control {
        Control::new(kind, value, ChangeHandler::new("c", None))
    }

    #[test]
    fn test_expand_headers_spans_actions() {
        let headers = vec![
            HeaderCell::new("Name"),
            HeaderCell {
                label: "Actions".into(),
                span: 3,
            },
        ];
        assert_eq!(expand_headers(&headers), vec!["Name", "Actions", "", ""]);
    }

    #[test]
    fn test_control_display() {
        assert_eq!(control_display(&control(ControlKind::Toggle, json!(true))).0, "[x]");
        assert_eq!(control_display(&control(ControlKind::Toggle, json!("yes"))).0, "[ ]");
        assert_eq!(control_display(&control(ControlKind::Rating, json!(2))).0, "★★☆☆☆");
        assert_eq!(
            control_display(&control(ControlKind::TextArea, json!("a\nb"))).0,
            "a⏎b"
        );
        assert_eq!(
            control_display(&control(ControlKind::ColorPicker, json!("#00ff00"))).0,
            "■ #00ff00"
        );
    }

    #[test]
    fn test_select_shows_label() {
        let entries = vec![SelectEntry::Option {
            value: json!(1),
            label: "one".into(),
            disabled: false,
        }];
        let select = control(ControlKind::Select(entries.clone()), json!("1"));
        assert_eq!(control_display(&select).0, "one ▾");

        let unknown = control(ControlKind::Select(entries), json!("9"));
        assert_eq!(control_display(&unknown).0, "9 ▾");
    }

    #[test]
    fn test_static_cell_is_single_line() {
        let cell = ViewCell::Field {
            column: "notes".into(),
            cell: Cell::Static(json!("x\ny")),
        };
        assert_eq!(cell_display(&cell).0, "x⏎y");
    }

    #[test]
    fn test_column_widths_clamped() {
        let headers = vec!["id".to_string(), "title".to_string()];
        let rows = vec![vec![
            ("1".to_string(), Style::default()),
            ("x".repeat(50), Style::default()),
        ]];
        assert_eq!(column_widths(&headers, &rows), vec![MIN_WIDTH, MAX_WIDTH]);
    }
}
