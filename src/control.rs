//! Interactive cell controls.
//!
//! A [`Control`] describes which widget a cell shows, the value it currently
//! displays, and where its change events go. Frontends decide how each kind
//! is painted and which user gestures produce a change.

use std::fmt;

use serde_json::Value;

use crate::fmt::format_value;
use crate::model::{EditCallback, SelectOption, SelectOptions};

/// Default upper bound of a rating control.
pub const RATING_MAX: u8 = 5;

/// Default bounds of a range slider.
pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 100.0;

/// Forwards a cell's changes to its column's edit callback.
///
/// Without a callback every change is dropped silently.
#[derive(Clone)]
pub struct ChangeHandler {
    column: String,
    on_edit: Option<EditCallback>,
}

impl ChangeHandler {
    pub fn new(column: impl Into<String>, on_edit: Option<EditCallback>) -> Self {
        Self {
            column: column.into(),
            on_edit,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns `true` if changes reach a callback.
    pub fn is_bound(&self) -> bool {
        self.on_edit.is_some()
    }

    /// Sends `(value, column)` to the callback, if any.
    pub fn emit(&self, value: Value) {
        if let Some(on_edit) = &self.on_edit {
            on_edit(value, &self.column);
        }
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeHandler")
            .field("column", &self.column)
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// One line of a select control's menu.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEntry {
    /// Group title; never selectable.
    GroupHeader(String),
    Option {
        value: Value,
        label: String,
        disabled: bool,
    },
}

impl SelectEntry {
    pub fn is_selectable(&self) -> bool {
        matches!(self, SelectEntry::Option { disabled: false, .. })
    }

    pub fn label(&self) -> &str {
        match self {
            SelectEntry::GroupHeader(name) => name,
            SelectEntry::Option { label, .. } => label,
        }
    }
}

impl From<&SelectOption> for SelectEntry {
    fn from(option: &SelectOption) -> Self {
        SelectEntry::Option {
            value: option.value.clone(),
            label: option.label.clone(),
            disabled: option.disabled,
        }
    }
}

/// Flattens select options into menu entries.
///
/// Groups become a header followed by the group's options; group and
/// in-group order are kept.
pub fn select_entries(options: Option<&SelectOptions>) -> Vec<SelectEntry> {
    match options {
        None => Vec::new(),
        Some(SelectOptions::Flat(options)) => options.iter().map(SelectEntry::from).collect(),
        Some(SelectOptions::Grouped(groups)) => groups
            .iter()
            .flat_map(|group| {
                std::iter::once(SelectEntry::GroupHeader(group.name.clone()))
                    .chain(group.options.iter().map(SelectEntry::from))
            })
            .collect(),
    }
}

/// Widget family of an editable cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Toggle,
    NumberInput,
    ColorPicker,
    Slider,
    DatePicker,
    TimePicker,
    Select(Vec<SelectEntry>),
    /// Auto-growing multi-line text.
    TextArea,
    Rating,
    TextInput,
}

impl ControlKind {
    pub fn name(&self) -> &'static str {
        match self {
            ControlKind::Toggle => "toggle",
            ControlKind::NumberInput => "number",
            ControlKind::ColorPicker => "color",
            ControlKind::Slider => "slider",
            ControlKind::DatePicker => "date",
            ControlKind::TimePicker => "time",
            ControlKind::Select(_) => "select",
            ControlKind::TextArea => "textarea",
            ControlKind::Rating => "rating",
            ControlKind::TextInput => "text",
        }
    }

    /// Value forwarded to the edit callback for a change to `value`.
    ///
    /// Select values are always sent as text; every other kind passes the
    /// value through untouched (a number input forwards its raw text).
    pub fn forwarded(&self, value: Value) -> Value {
        match self {
            ControlKind::Select(_) => Value::String(format_value(&value)),
            _ => value,
        }
    }
}

/// An interactive control bound to one cell.
#[derive(Debug, Clone)]
pub struct Control {
    kind: ControlKind,
    value: Value,
    handler: ChangeHandler,
}

impl Control {
    pub fn new(kind: ControlKind, value: Value, handler: ChangeHandler) -> Self {
        Self {
            kind,
            value,
            handler,
        }
    }

    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    /// Value the control currently shows.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn column(&self) -> &str {
        self.handler.column()
    }

    pub fn handler(&self) -> &ChangeHandler {
        &self.handler
    }

    /// Applies a user change: the control shows `value` and the column's
    /// callback, if any, receives the forwarded form of it, which is also
    /// returned.
    pub fn change(&mut self, value: Value) -> Value {
        let forwarded = self.kind.forwarded(value.clone());
        self.value = value;
        self.handler.emit(forwarded.clone());
        forwarded
    }

    /// Label of the selected option for select controls.
    pub fn selected_label(&self) -> Option<&str> {
        let ControlKind::Select(entries) = &self.kind else {
            return None;
        };
        let current = format_value(&self.value);
        entries.iter().find_map(|entry| match entry {
            SelectEntry::Option { value, label, .. } if format_value(value) == current => {
                Some(label.as_str())
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OptionGroup;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(Value, String)>>>;

    fn recording_handler(column: &str) -> (ChangeHandler, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let cb: EditCallback = Rc::new(move |v: Value, name: &str| {
            sink.borrow_mut().push((v, name.to_string()));
        });
        (ChangeHandler::new(column, Some(cb)), calls)
    }

    #[test]
    fn test_change_forwards_value_and_column() {
        let (handler, calls) = recording_handler("qty");
        let mut control = Control::new(ControlKind::NumberInput, json!(3), handler);

        control.change(json!("17"));

        assert_eq!(control.value(), &json!("17"));
        assert_eq!(*calls.borrow(), vec![(json!("17"), "qty".to_string())]);
    }

    #[test]
    fn test_unbound_change_updates_local_value_only() {
        let mut control = Control::new(
            ControlKind::Toggle,
            json!(false),
            ChangeHandler::new("active", None),
        );
        control.change(json!(true));
        assert_eq!(control.value(), &json!(true));
        assert!(!control.handler().is_bound());
    }

    #[test]
    fn test_select_change_is_sent_as_text() {
        let (handler, calls) = recording_handler("level");
        let entries = vec![SelectEntry::Option {
            value: json!(2),
            label: "two".into(),
            disabled: false,
        }];
        let mut control = Control::new(ControlKind::Select(entries), json!(1), handler);

        control.change(json!(2));

        assert_eq!(control.value(), &json!(2));
        assert_eq!(*calls.borrow(), vec![(json!("2"), "level".to_string())]);
        assert_eq!(control.selected_label(), Some("two"));
    }

    #[test]
    fn test_select_entries_grouped_order() {
        let options = SelectOptions::Grouped(vec![
            OptionGroup::new("A", vec![SelectOption::new("1", "one")]),
            OptionGroup::new("B", vec![SelectOption::new("2", "two")]),
        ]);
        let labels: Vec<(bool, String)> = select_entries(Some(&options))
            .iter()
            .map(|e| (e.is_selectable(), e.label().to_string()))
            .collect();
        assert_eq!(
            labels,
            vec![
                (false, "A".to_string()),
                (true, "one".to_string()),
                (false, "B".to_string()),
                (true, "two".to_string()),
            ]
        );
    }

    #[test]
    fn test_select_entries_flat_keeps_disabled() {
        let options = SelectOptions::Flat(vec![
            SelectOption::new("a", "Alpha"),
            SelectOption::new("b", "Beta").disabled(),
        ]);
        let entries = select_entries(Some(&options));
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_selectable());
        assert!(!entries[1].is_selectable());
        assert!(select_entries(None).is_empty());
    }
}
