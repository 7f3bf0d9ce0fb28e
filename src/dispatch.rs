//! Cell dispatch: decides how one `(row, column)` pair is rendered.
//!
//! First match wins:
//! 1. a custom renderer on the column,
//! 2. static text for read-only columns,
//! 3. the control matching the column's semantic type.

use std::fmt;

use serde_json::Value;

use crate::control::{ChangeHandler, Control, ControlKind, select_entries};
use crate::model::{Column, Row, SemanticType};

/// Error raised by a custom cell renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError(pub String);

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render error: {}", self.0)
    }
}

impl std::error::Error for RenderError {}

/// Output of a custom renderer.
#[derive(Debug, Clone)]
pub enum CellContent {
    Text(String),
    Control(Control),
}

/// Replaces standard rendering for a column.
///
/// The renderer receives the whole row and a change handler that forwards
/// `(value, column_name)` to the column's edit callback.
pub trait CellRenderer {
    fn render(&self, row: &Row, on_change: ChangeHandler) -> Result<CellContent, RenderError>;
}

impl<F> CellRenderer for F
where
    F: Fn(&Row, ChangeHandler) -> Result<CellContent, RenderError>,
{
    fn render(&self, row: &Row, on_change: ChangeHandler) -> Result<CellContent, RenderError> {
        self(row, on_change)
    }
}

/// Rendered form of one cell.
#[derive(Debug, Clone)]
pub enum Cell {
    /// Produced by the column's custom renderer.
    Custom(CellContent),
    /// Raw field value of a read-only column.
    Static(Value),
    Control(Control),
}

/// Control kind for an editable column of the given type.
pub fn control_kind(column: &Column) -> ControlKind {
    match column.semantic_type {
        SemanticType::Boolean => ControlKind::Toggle,
        SemanticType::Number => ControlKind::NumberInput,
        SemanticType::Color => ControlKind::ColorPicker,
        SemanticType::Range => ControlKind::Slider,
        SemanticType::Date => ControlKind::DatePicker,
        SemanticType::Time => ControlKind::TimePicker,
        SemanticType::Select => ControlKind::Select(select_entries(column.options.as_ref())),
        SemanticType::TextArea => ControlKind::TextArea,
        SemanticType::Rating => ControlKind::Rating,
        SemanticType::Text => ControlKind::TextInput,
    }
}

/// Renders one cell.
///
/// `local` is the value the cell's control last showed, if the user changed
/// it; it takes precedence over the row's field for standard controls.
pub fn render_cell(row: &Row, column: &Column, local: Option<&Value>) -> Result<Cell, RenderError> {
    let handler = ChangeHandler::new(column.name.clone(), column.on_edit.clone());

    if let Some(renderer) = &column.renderer {
        return renderer.render(row, handler).map(Cell::Custom);
    }

    let current = local
        .or_else(|| row.get(&column.name))
        .cloned()
        .unwrap_or(Value::Null);

    if !column.editable {
        return Ok(Cell::Static(current));
    }

    Ok(Cell::Control(Control::new(
        control_kind(column),
        current,
        handler,
    )))
}
