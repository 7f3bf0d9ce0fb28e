//! The table view component.
//!
//! `TabularView` owns the rows, the sticky schema, the page state and the
//! local values of edited controls, and turns them into a [`ViewOutput`].

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use crate::dispatch::{Cell, CellContent, render_cell};
use crate::model::{Action, Column, Row, RowId};
use crate::pagination::{PageController, PaginationMode};
use crate::schema::SchemaResolver;
use crate::view::common::{
    ActionButton, BodyRow, HeaderCell, PaginationFooter, RowError, TableBody, TableViewModel,
    ViewCell, ViewOutput, ViewRow,
};

/// Shown while `is_loading` is set and no loading content is configured.
pub const DEFAULT_LOADING: &str = "Loading...";
/// Shown in place of rows when the visible page is empty.
pub const DEFAULT_EMPTY_RESULT: &str = "No results found";
/// Header over the action cells.
pub const ACTIONS_HEADER: &str = "Actions";

/// Upstream failure shown instead of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub message: String,
}

impl LoadError {
    pub fn new(message: impl fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LoadError {}

/// Inputs of a table view.
#[derive(Debug)]
pub struct TableProps {
    pub rows: Vec<Row>,
    /// Explicit schema. `None` or empty means infer from the first row.
    pub columns: Option<Vec<Column>>,
    pub is_loading: bool,
    pub loading_content: Option<String>,
    pub error: Option<LoadError>,
    pub actions: Vec<Action>,
    /// Initial page size.
    pub rows_per_page: usize,
    /// Further page sizes a frontend may offer.
    pub page_size_options: Vec<usize>,
    /// Initial page index.
    pub page_index: usize,
    /// Item count across all pages.
    pub total_items: usize,
    pub pagination: PaginationMode,
    pub empty_content: Option<String>,
}

impl Default for TableProps {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            columns: None,
            is_loading: false,
            loading_content: None,
            error: None,
            actions: Vec::new(),
            rows_per_page: 10,
            page_size_options: Vec::new(),
            page_index: 0,
            total_items: 0,
            pagination: PaginationMode::Client,
            empty_content: None,
        }
    }
}

type DraftKey = (RowId, String);

/// Table view component.
pub struct TabularView {
    rows: Vec<Row>,
    schema: SchemaResolver,
    pages: PageController,
    actions: Vec<Action>,
    is_loading: bool,
    loading_content: String,
    error: Option<LoadError>,
    empty_content: String,
    /// Values shown by controls the user changed, keyed by row and column.
    drafts: HashMap<DraftKey, Value>,
}

impl TabularView {
    /// Mounts a view. The schema is fixed here or on the first non-empty rows.
    pub fn new(props: TableProps) -> Self {
        let mut pages = PageController::new(props.page_index, props.rows_per_page, props.pagination)
            .with_page_size_options(&props.page_size_options);
        pages.set_total_items(props.total_items);

        let mut schema = SchemaResolver::new(props.columns);
        schema.observe(&props.rows);

        Self {
            rows: props.rows,
            schema,
            pages,
            actions: props.actions,
            is_loading: props.is_loading,
            loading_content: props
                .loading_content
                .unwrap_or_else(|| DEFAULT_LOADING.to_string()),
            error: props.error,
            empty_content: props
                .empty_content
                .unwrap_or_else(|| DEFAULT_EMPTY_RESULT.to_string()),
            drafts: HashMap::new(),
        }
    }

    /// Sets the external page-index owner.
    pub fn with_page_sink(mut self, sink: impl FnMut(usize) + 'static) -> Self {
        self.pages = self.pages.with_sink(sink);
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        self.schema.columns()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn pages(&self) -> &PageController {
        &self.pages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Replaces the row set.
    ///
    /// Local control values are dropped once the incoming rows carry them,
    /// when the upstream value changed underneath them, or when their row
    /// is gone.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        if !self.drafts.is_empty() {
            let old = index_by_id(&self.rows);
            let new = index_by_id(&rows);
            self.drafts.retain(|(id, column), draft| {
                let before = old.get(id).and_then(|r| r.get(column));
                match new.get(id).map(|r| r.get(column)) {
                    Some(after) => after != Some(&*draft) && after == before,
                    None => false,
                }
            });
        }
        self.rows = rows;
        if self.schema.observe(&self.rows) {
            debug!(columns = self.schema.columns().len(), "schema resolved");
        }
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn set_error(&mut self, error: Option<LoadError>) {
        self.error = error;
    }

    pub fn set_total_items(&mut self, total: usize) {
        self.pages.set_total_items(total);
    }

    /// Moves to `page`; the page sink is told.
    pub fn change_page(&mut self, page: usize) {
        self.pages.change_page(page);
    }

    /// Changes rows per page and returns to the first page.
    pub fn change_page_size(&mut self, page_size: usize) {
        self.pages.change_page_size(page_size);
    }

    pub fn next_page(&mut self) -> bool {
        self.pages.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pages.prev_page()
    }

    pub fn cycle_page_size(&mut self, forward: bool) {
        self.pages.cycle_page_size(forward);
    }

    /// Local value of a changed control, if any.
    pub fn draft(&self, row: &RowId, column: &str) -> Option<&Value> {
        self.drafts.get(&(row.clone(), column.to_string()))
    }

    /// Applies a user change to the control of `(row, column)`.
    ///
    /// The control keeps showing `value`; the column's edit callback, if
    /// any, receives it. Returns the value handed to the callback, or `None`
    /// when the cell is not editable or has no body cell (unknown row,
    /// unknown or hidden column).
    pub fn apply_edit(&mut self, row: &RowId, column: &str, value: Value) -> Option<Value> {
        let col = self.schema.find(column).filter(|c| c.visible)?;
        let record = self.rows.iter().find(|r| r.id().as_ref() == Some(row))?;
        let key = (row.clone(), column.to_string());
        let cell = match render_cell(record, col, self.drafts.get(&key)) {
            Ok(cell) => cell,
            Err(e) => {
                warn!(row = %row, column, error = %e, "edit on failed cell ignored");
                return None;
            }
        };
        match cell {
            Cell::Control(mut control) => {
                let forwarded = control.change(value.clone());
                self.drafts.insert(key, value);
                Some(forwarded)
            }
            Cell::Custom(CellContent::Control(mut control)) => Some(control.change(value)),
            Cell::Custom(CellContent::Text(_)) | Cell::Static(_) => None,
        }
    }

    /// Activates action `action_id` on `row`. Returns `false` if the action
    /// is not configured.
    pub fn trigger_action(&self, row: &RowId, action_id: &str) -> bool {
        match self.actions.iter().find(|a| a.id == action_id) {
            Some(action) => {
                action.fire(row);
                true
            }
            None => false,
        }
    }

    /// Builds the current output.
    pub fn render(&self) -> ViewOutput {
        if self.is_loading {
            return ViewOutput::Loading(self.loading_content.clone());
        }
        if let Some(error) = &self.error {
            return ViewOutput::Error(format!("Error: {}", error.message));
        }
        ViewOutput::Table(self.render_table())
    }

    fn render_table(&self) -> TableViewModel {
        let mut headers: Vec<HeaderCell> = self
            .schema
            .visible_columns()
            .map(|c| HeaderCell::new(c.display_label()))
            .collect();
        if !self.actions.is_empty() {
            headers.push(HeaderCell {
                label: ACTIONS_HEADER.to_string(),
                span: self.actions.len(),
            });
        }

        let range = self.pages.visible_range(self.rows.len());
        let body = if range.is_empty() {
            TableBody::Empty {
                colspan: self.schema.visible_count() + usize::from(!self.actions.is_empty()),
                content: self.empty_content.clone(),
            }
        } else {
            let start = range.start;
            TableBody::Rows(
                self.rows[range]
                    .iter()
                    .enumerate()
                    .map(|(i, row)| match self.render_row(row) {
                        Ok(view_row) => BodyRow::Rendered(view_row),
                        Err(reason) => {
                            warn!(index = start + i, %reason, "row render failed");
                            BodyRow::Failed {
                                index: start + i,
                                reason,
                            }
                        }
                    })
                    .collect(),
            )
        };

        TableViewModel {
            headers,
            body,
            footer: self.footer(),
        }
    }

    fn render_row(&self, row: &Row) -> Result<ViewRow, RowError> {
        let id = row.id().ok_or(RowError::MissingId)?;

        let mut cells = Vec::with_capacity(self.schema.visible_count() + self.actions.len());
        for column in self.schema.visible_columns() {
            let local = self.drafts.get(&(id.clone(), column.name.clone()));
            let cell =
                render_cell(row, column, local).map_err(|e| RowError::Render(e.to_string()))?;
            cells.push(ViewCell::Field {
                column: column.name.clone(),
                cell,
            });
        }
        cells.extend(self.actions.iter().map(|action| {
            ViewCell::Action(ActionButton {
                row: id.clone(),
                action: action.clone(),
            })
        }));

        Ok(ViewRow { id, cells })
    }

    fn footer(&self) -> PaginationFooter {
        PaginationFooter {
            page: self.pages.page(),
            page_size: self.pages.page_size(),
            page_size_options: self.pages.page_size_options().to_vec(),
            summary: self.pages.summary(),
            has_prev: self.pages.has_prev(),
            has_next: self.pages.has_next(),
        }
    }
}

impl fmt::Debug for TabularView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabularView")
            .field("rows", &self.rows.len())
            .field("schema", &self.schema)
            .field("pages", &self.pages)
            .field("actions", &self.actions)
            .field("is_loading", &self.is_loading)
            .field("error", &self.error)
            .field("drafts", &self.drafts.len())
            .finish()
    }
}

fn index_by_id(rows: &[Row]) -> HashMap<RowId, &Row> {
    rows.iter().filter_map(|r| Some((r.id()?, r))).collect()
}
