//! Column definitions and the semantic types that select edit controls.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dispatch::CellRenderer;

/// Callback receiving `(new_value, column_name)` for every edit of a column.
pub type EditCallback = Rc<dyn Fn(Value, &str)>;

/// Declared type of a column, selects the control used when the column is editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum SemanticType {
    Boolean,
    Number,
    Color,
    /// Numeric range rendered as a slider.
    Range,
    Date,
    Time,
    /// Single choice from `Column::options`.
    Select,
    /// Multi-line, auto-growing text.
    TextArea,
    Rating,
    /// Plain single-line text; also the fallback for unknown tags.
    #[default]
    Text,
}

impl SemanticType {
    /// Parses a type tag. Unknown tags fall back to `Text`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "boolean" => SemanticType::Boolean,
            "number" => SemanticType::Number,
            "color" => SemanticType::Color,
            "range" => SemanticType::Range,
            "date" => SemanticType::Date,
            "time" => SemanticType::Time,
            "select" => SemanticType::Select,
            "textarea" => SemanticType::TextArea,
            "rating" => SemanticType::Rating,
            _ => SemanticType::Text,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            SemanticType::Boolean => "boolean",
            SemanticType::Number => "number",
            SemanticType::Color => "color",
            SemanticType::Range => "range",
            SemanticType::Date => "date",
            SemanticType::Time => "time",
            SemanticType::Select => "select",
            SemanticType::TextArea => "textarea",
            SemanticType::Rating => "rating",
            SemanticType::Text => "text",
        }
    }

    /// Type of a column inferred from a sample value's primitive kind.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Bool(_) => SemanticType::Boolean,
            Value::Number(_) => SemanticType::Number,
            Value::Null | Value::String(_) | Value::Array(_) | Value::Object(_) => {
                SemanticType::Text
            }
        }
    }
}

impl From<String> for SemanticType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<SemanticType> for &'static str {
    fn from(ty: SemanticType) -> Self {
        ty.tag()
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One choice of a select column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    #[serde(rename = "display", alias = "label")]
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Named group of select choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionGroup {
    #[serde(rename = "groupName", alias = "name")]
    pub name: String,
    pub options: Vec<SelectOption>,
}

impl OptionGroup {
    pub fn new(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

/// Choices of a select column, flat or grouped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectOptions {
    // Grouped first: a flat option never has `groupName`, so it falls through.
    Grouped(Vec<OptionGroup>),
    Flat(Vec<SelectOption>),
}

/// One displayable field of the table.
#[derive(Clone)]
pub struct Column {
    /// Key of the field in each row.
    pub name: String,
    /// Header text override.
    pub label: Option<String>,
    pub semantic_type: SemanticType,
    pub editable: bool,
    /// Hidden columns render neither header nor body cells.
    pub visible: bool,
    pub options: Option<SelectOptions>,
    pub on_edit: Option<EditCallback>,
    /// Replaces standard rendering of this column entirely.
    pub renderer: Option<Rc<dyn CellRenderer>>,
}

impl Column {
    /// Creates a visible, read-only text column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            semantic_type: SemanticType::Text,
            editable: false,
            visible: true,
            options: None,
            on_edit: None,
            renderer: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_type(mut self, semantic_type: SemanticType) -> Self {
        self.semantic_type = semantic_type;
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_options(mut self, options: SelectOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_on_edit(mut self, on_edit: impl Fn(Value, &str) + 'static) -> Self {
        self.on_edit = Some(Rc::new(on_edit));
        self
    }

    pub fn with_renderer(mut self, renderer: impl CellRenderer + 'static) -> Self {
        self.renderer = Some(Rc::new(renderer));
        self
    }

    /// Header text: the label override, or the field name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("semantic_type", &self.semantic_type)
            .field("editable", &self.editable)
            .field("visible", &self.visible)
            .field("options", &self.options)
            .field("on_edit", &self.on_edit.is_some())
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_semantic_type_tags() {
        for ty in [
            SemanticType::Boolean,
            SemanticType::Number,
            SemanticType::Color,
            SemanticType::Range,
            SemanticType::Date,
            SemanticType::Time,
            SemanticType::Select,
            SemanticType::TextArea,
            SemanticType::Rating,
            SemanticType::Text,
        ] {
            assert_eq!(SemanticType::from_tag(ty.tag()), ty);
        }
    }

    #[test]
    fn test_unknown_tag_falls_back_to_text() {
        assert_eq!(SemanticType::from_tag("string"), SemanticType::Text);
        assert_eq!(SemanticType::from_tag("Boolean"), SemanticType::Text);
        let ty: SemanticType = serde_json::from_value(json!("undefined")).unwrap();
        assert_eq!(ty, SemanticType::Text);
    }

    #[test]
    fn test_of_value() {
        assert_eq!(SemanticType::of_value(&json!(true)), SemanticType::Boolean);
        assert_eq!(SemanticType::of_value(&json!(1.25)), SemanticType::Number);
        assert_eq!(SemanticType::of_value(&json!("x")), SemanticType::Text);
        assert_eq!(SemanticType::of_value(&json!(null)), SemanticType::Text);
    }

    #[test]
    fn test_select_options_flat_and_grouped_parse() {
        let flat: SelectOptions =
            serde_json::from_value(json!([{"value": "1", "display": "one", "disabled": true}]))
                .unwrap();
        assert_eq!(
            flat,
            SelectOptions::Flat(vec![SelectOption::new("1", "one").disabled()])
        );

        let grouped: SelectOptions = serde_json::from_value(json!([
            {"groupName": "A", "options": [{"value": "1", "display": "one"}]}
        ]))
        .unwrap();
        assert_eq!(
            grouped,
            SelectOptions::Grouped(vec![OptionGroup::new(
                "A",
                vec![SelectOption::new("1", "one")]
            )])
        );
    }

    #[test]
    fn test_column_defaults_and_label() {
        let col = Column::new("email");
        assert!(col.visible);
        assert!(!col.editable);
        assert_eq!(col.display_label(), "email");

        let col = col.with_label("E-mail").hidden();
        assert_eq!(col.display_label(), "E-mail");
        assert!(!col.visible);
    }
}
