//! Data model: rows, columns and row actions.

pub mod action;
pub mod column;

pub use action::{Action, ActionTrigger};
pub use column::{Column, EditCallback, OptionGroup, SelectOption, SelectOptions, SemanticType};

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the field carrying row identity.
pub const ID_FIELD: &str = "id";

/// Render identity of a row: the textual form of its `id` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One record of the table.
///
/// Fields keep the order they were delivered in; schema inference relies on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: Map<String, Value>,
}

impl Row {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builds a row from a JSON object. Returns `None` for any other value.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Returns the row identity.
    ///
    /// Strings are taken as-is, numbers and booleans by their text form.
    /// A missing, null or composite `id` yields `None`.
    pub fn id(&self) -> Option<RowId> {
        match self.fields.get(ID_FIELD)? {
            Value::String(s) => Some(RowId::new(s.clone())),
            Value::Number(n) => Some(RowId::new(n.to_string())),
            Value::Bool(b) => Some(RowId::new(b.to_string())),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    /// Field names in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Row {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
