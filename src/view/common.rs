//! UI-agnostic view model types.
//!
//! These types describe what a table shows without depending on a rendering
//! framework. The TUI maps them to ratatui widgets; another frontend would
//! map them to its own widget set.

use std::fmt;

use crate::dispatch::{Cell, CellContent};
use crate::fmt::format_value;
use crate::model::{Action, RowId};
use crate::pagination::PageSummary;

/// Header cell. `span` is the number of body cells it sits above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub span: usize,
}

impl HeaderCell {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            span: 1,
        }
    }
}

/// Trigger button of one action on one row.
#[derive(Clone)]
pub struct ActionButton {
    pub row: RowId,
    pub action: Action,
}

impl ActionButton {
    pub fn label(&self) -> &str {
        &self.action.label
    }

    /// Activates the action for this row.
    pub fn press(&self) {
        self.action.fire(&self.row);
    }
}

impl fmt::Debug for ActionButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionButton")
            .field("row", &self.row)
            .field("action", &self.action.id)
            .finish()
    }
}

/// One body cell.
#[derive(Debug, Clone)]
pub enum ViewCell {
    /// Cell of a schema column.
    Field { column: String, cell: Cell },
    Action(ActionButton),
}

impl ViewCell {
    /// Column name for field cells.
    pub fn column(&self) -> Option<&str> {
        match self {
            ViewCell::Field { column, .. } => Some(column),
            ViewCell::Action(_) => None,
        }
    }

    /// Plain text form of the cell, for frontends without widgets.
    pub fn text(&self) -> String {
        match self {
            ViewCell::Field { cell, .. } => match cell {
                Cell::Static(value) => format_value(value),
                Cell::Control(control) | Cell::Custom(CellContent::Control(control)) => control
                    .selected_label()
                    .map(str::to_string)
                    .unwrap_or_else(|| format_value(control.value())),
                Cell::Custom(CellContent::Text(text)) => text.clone(),
            },
            ViewCell::Action(button) => button.label().to_string(),
        }
    }
}

/// A rendered row.
#[derive(Debug, Clone)]
pub struct ViewRow {
    pub id: RowId,
    pub cells: Vec<ViewCell>,
}

/// Why a row could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The row has no usable `id` field.
    MissingId,
    /// A custom renderer failed.
    Render(String),
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::MissingId => write!(f, "row has no id"),
            RowError::Render(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RowError {}

/// Body row: rendered, or isolated after a failure.
#[derive(Debug, Clone)]
pub enum BodyRow {
    Rendered(ViewRow),
    /// `index` is the row's position in the full row set.
    Failed { index: usize, reason: RowError },
}

/// Table body.
#[derive(Debug, Clone)]
pub enum TableBody {
    Rows(Vec<BodyRow>),
    /// Single placeholder cell spanning `colspan` columns.
    Empty { colspan: usize, content: String },
}

/// Pagination footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationFooter {
    pub page: usize,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub summary: PageSummary,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableViewModel {
    pub headers: Vec<HeaderCell>,
    pub body: TableBody,
    pub footer: PaginationFooter,
}

impl TableViewModel {
    /// Rendered rows, skipping failed ones.
    pub fn rows(&self) -> impl Iterator<Item = &ViewRow> {
        let rows: &[BodyRow] = match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Empty { .. } => &[],
        };
        rows.iter().filter_map(|r| match r {
            BodyRow::Rendered(row) => Some(row),
            BodyRow::Failed { .. } => None,
        })
    }

    pub fn body_len(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Empty { .. } => 0,
        }
    }
}

/// What the view shows.
#[derive(Debug, Clone)]
pub enum ViewOutput {
    Loading(String),
    Error(String),
    Table(TableViewModel),
}
