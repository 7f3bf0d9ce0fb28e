//! Table document loading.
//!
//! A document is a JSON file holding either a bare array of rows or an
//! object with rows, an optional column schema, actions and page settings:
//!
//! ```json
//! {
//!   "columns": [
//!     {"name": "id", "hidden": true},
//!     {"name": "done", "rename": "Done", "type": "boolean", "editable": true},
//!     {"name": "level", "type": "select", "editable": true,
//!      "options": [{"groupName": "Low", "options": [{"value": "1", "display": "one"}]}]}
//!   ],
//!   "rows": [{"id": 1, "done": false, "level": "1"}],
//!   "actions": [{"id": "delete", "label": "Delete"}],
//!   "rows_per_page": 10,
//!   "page_size_options": [5, 25],
//!   "empty_result": "Nothing to show"
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::model::{Column, Row, SelectOptions, SemanticType};

/// Errors that can occur while loading a document.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not a valid document.
    Parse(serde_json::Error),
    /// The document parsed but violates a constraint.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid document: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Column entry of a document.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    /// Header text override.
    #[serde(default, alias = "label")]
    pub rename: Option<String>,
    #[serde(default, rename = "type")]
    pub semantic_type: SemanticType,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub options: Option<SelectOptions>,
}

impl ColumnSpec {
    /// Builds a column without callbacks; the caller wires `on_edit`.
    pub fn to_column(&self) -> Column {
        Column {
            label: self.rename.clone(),
            semantic_type: self.semantic_type,
            editable: self.editable,
            visible: !self.hidden,
            options: self.options.clone(),
            ..Column::new(self.name.clone())
        }
    }
}

/// Action entry of a document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionSpec {
    pub id: String,
    pub label: String,
}

/// A parsed table document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Document {
    pub columns: Option<Vec<ColumnSpec>>,
    pub rows: Vec<Row>,
    pub actions: Vec<ActionSpec>,
    pub rows_per_page: Option<usize>,
    pub page_size_options: Vec<usize>,
    #[serde(alias = "emptyResult")]
    pub empty_result: Option<String>,
}

impl Document {
    /// Columns without callbacks, or `None` to infer them from the rows.
    pub fn columns(&self) -> Option<Vec<Column>> {
        self.columns
            .as_ref()
            .map(|specs| specs.iter().map(ColumnSpec::to_column).collect())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rows_per_page == Some(0) {
            return Err(ConfigError::Invalid(
                "rows_per_page must be positive".to_string(),
            ));
        }
        if let Some(columns) = &self.columns {
            let mut seen = HashSet::new();
            for column in columns {
                if !seen.insert(column.name.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "duplicate column name '{}'",
                        column.name
                    )));
                }
            }
        }
        let mut seen = HashSet::new();
        for action in &self.actions {
            if !seen.insert(action.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate action id '{}'",
                    action.id
                )));
            }
        }
        Ok(())
    }
}

/// Parses a document from JSON text.
///
/// Text opening with `[` is a bare row array; anything else is read as a
/// full document.
pub fn parse_document(text: &str) -> Result<Document, ConfigError> {
    let document = if text.trim_start().starts_with('[') {
        Document {
            rows: serde_json::from_str(text)?,
            ..Document::default()
        }
    } else {
        serde_json::from_str::<Document>(text)?
    };
    document.validate()?;
    Ok(document)
}

/// Reads and parses a document file.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let document = parse_document(&text)?;
    debug!(
        path = %path.display(),
        rows = document.rows.len(),
        explicit_columns = document.columns.is_some(),
        "document loaded"
    );
    Ok(document)
}
