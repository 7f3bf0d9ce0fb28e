//! Cell editor popups.
//!
//! An editor is opened on an editable cell and produces a value when the
//! user confirms. The view applies that value as a control change.

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

use crate::control::{Control, ControlKind, RATING_MAX, SLIDER_MAX, SLIDER_MIN, SelectEntry};
use crate::fmt::format_value;
use crate::model::RowId;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Characters a free-text editor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFilter {
    Any,
    Numeric,
    Color,
}

impl TextFilter {
    fn accepts(self, c: char) -> bool {
        match self {
            TextFilter::Any => true,
            TextFilter::Numeric => c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'),
            TextFilter::Color => c.is_ascii_hexdigit() || c == '#',
        }
    }
}

/// Stepped value families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Slider,
    Rating,
    Date,
    Time,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorKind {
    Text {
        buffer: String,
        multiline: bool,
        filter: TextFilter,
    },
    Choice {
        entries: Vec<SelectEntry>,
        cursor: usize,
    },
    Stepper {
        value: Value,
        step: StepKind,
    },
}

/// Result of feeding a key to an editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    Pending,
    Cancel,
    Commit(Value),
}

/// Open editor bound to one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    pub row: RowId,
    pub column: String,
    pub control: ControlKind,
    pub kind: EditorKind,
}

impl Editor {
    /// Opens an editor for `control` on `row`.
    ///
    /// Toggles are flipped in place and have no editor.
    pub fn open(row: RowId, control: &Control) -> Option<Self> {
        let current = control.value();
        let kind = match control.kind() {
            ControlKind::Toggle => return None,
            ControlKind::TextInput => text(current, false, TextFilter::Any),
            ControlKind::TextArea => text(current, true, TextFilter::Any),
            ControlKind::NumberInput => text(current, false, TextFilter::Numeric),
            ControlKind::ColorPicker => text(current, false, TextFilter::Color),
            ControlKind::Select(entries) => EditorKind::Choice {
                cursor: initial_choice(entries, current),
                entries: entries.clone(),
            },
            ControlKind::Slider => stepper(current, StepKind::Slider),
            ControlKind::Rating => stepper(current, StepKind::Rating),
            ControlKind::DatePicker => stepper(current, StepKind::Date),
            ControlKind::TimePicker => stepper(current, StepKind::Time),
        };
        Some(Self {
            row,
            column: control.column().to_string(),
            control: control.kind().clone(),
            kind,
        })
    }

    /// Popup title.
    pub fn title(&self) -> String {
        format!("Edit {} ({})", self.column, self.control.name())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorOutcome {
        if key.code == KeyCode::Esc {
            return EditorOutcome::Cancel;
        }
        match &mut self.kind {
            EditorKind::Text {
                buffer,
                multiline,
                filter,
            } => match key.code {
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    EditorOutcome::Commit(Value::String(buffer.clone()))
                }
                KeyCode::Enter if *multiline && !key.modifiers.contains(KeyModifiers::ALT) => {
                    buffer.push('\n');
                    EditorOutcome::Pending
                }
                KeyCode::Enter => EditorOutcome::Commit(Value::String(buffer.clone())),
                KeyCode::Backspace => {
                    buffer.pop();
                    EditorOutcome::Pending
                }
                KeyCode::Char(c) if filter.accepts(c) => {
                    buffer.push(c);
                    EditorOutcome::Pending
                }
                _ => EditorOutcome::Pending,
            },
            EditorKind::Choice { entries, cursor } => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    *cursor = step_choice(entries, *cursor, false);
                    EditorOutcome::Pending
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    *cursor = step_choice(entries, *cursor, true);
                    EditorOutcome::Pending
                }
                KeyCode::Enter => match entries.get(*cursor) {
                    Some(SelectEntry::Option {
                        value,
                        disabled: false,
                        ..
                    }) => EditorOutcome::Commit(value.clone()),
                    _ => EditorOutcome::Pending,
                },
                _ => EditorOutcome::Pending,
            },
            EditorKind::Stepper { value, step } => {
                let delta = match key.code {
                    KeyCode::Right | KeyCode::Up | KeyCode::Char('+') => 1,
                    KeyCode::Left | KeyCode::Down | KeyCode::Char('-') => -1,
                    KeyCode::PageUp => 10,
                    KeyCode::PageDown => -10,
                    KeyCode::Enter => return EditorOutcome::Commit(value.clone()),
                    _ => return EditorOutcome::Pending,
                };
                *value = apply_step(*step, value, delta);
                EditorOutcome::Pending
            }
        }
    }
}

fn text(current: &Value, multiline: bool, filter: TextFilter) -> EditorKind {
    EditorKind::Text {
        buffer: format_value(current),
        multiline,
        filter,
    }
}

fn stepper(current: &Value, step: StepKind) -> EditorKind {
    EditorKind::Stepper {
        value: current.clone(),
        step,
    }
}

/// Cursor on the currently selected option, else the first selectable one.
fn initial_choice(entries: &[SelectEntry], current: &Value) -> usize {
    let current = format_value(current);
    entries
        .iter()
        .position(|e| matches!(e, SelectEntry::Option { value, .. } if format_value(value) == current))
        .or_else(|| entries.iter().position(SelectEntry::is_selectable))
        .unwrap_or(0)
}

/// Next selectable entry in the given direction; stays put at the ends.
fn step_choice(entries: &[SelectEntry], cursor: usize, forward: bool) -> usize {
    let found = if forward {
        entries
            .iter()
            .enumerate()
            .skip(cursor + 1)
            .find(|(_, e)| e.is_selectable())
    } else {
        entries
            .iter()
            .enumerate()
            .take(cursor)
            .rev()
            .find(|(_, e)| e.is_selectable())
    };
    found.map(|(i, _)| i).unwrap_or(cursor)
}

/// Moves a stepped value by `delta` units.
///
/// Sliders move in whole numbers within their range, ratings by one star
/// (page keys jump to the ends), dates by days and times by minutes.
pub fn apply_step(step: StepKind, value: &Value, delta: i64) -> Value {
    match step {
        StepKind::Slider => {
            let v = value.as_f64().unwrap_or(SLIDER_MIN);
            Value::from((v.round() + delta as f64).clamp(SLIDER_MIN, SLIDER_MAX) as i64)
        }
        StepKind::Rating => {
            let v = value.as_f64().unwrap_or(0.0).round() as i64;
            Value::from((v + delta).clamp(0, i64::from(RATING_MAX)))
        }
        StepKind::Date => {
            let date = value
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
                .unwrap_or_else(|| Local::now().date_naive());
            let moved = date
                .checked_add_signed(Duration::days(delta))
                .unwrap_or(date);
            Value::String(moved.format(DATE_FORMAT).to_string())
        }
        StepKind::Time => {
            let time = value
                .as_str()
                .and_then(|s| {
                    NaiveTime::parse_from_str(s, TIME_FORMAT)
                        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
                        .ok()
                })
                .unwrap_or(NaiveTime::MIN);
            let (moved, _) = time.overflowing_add_signed(Duration::minutes(delta));
            Value::String(moved.format(TIME_FORMAT).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ChangeHandler;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn open(kind: ControlKind, value: Value) -> Editor {
        let control = Control::new(kind, value, ChangeHandler::new("c", None));
        Editor::open(RowId::new("1"), &control).unwrap()
    }

    fn entries() -> Vec<SelectEntry> {
        vec![
            SelectEntry::GroupHeader("Low".into()),
            SelectEntry::Option {
                value: json!(1),
                label: "one".into(),
                disabled: false,
            },
            SelectEntry::Option {
                value: json!(2),
                label: "two".into(),
                disabled: true,
            },
            SelectEntry::GroupHeader("High".into()),
            SelectEntry::Option {
                value: json!(3),
                label: "three".into(),
                disabled: false,
            },
        ]
    }

    #[test]
    fn test_toggle_has_no_editor() {
        let control = Control::new(ControlKind::Toggle, json!(true), ChangeHandler::new("c", None));
        assert!(Editor::open(RowId::new("1"), &control).is_none());
    }

    #[test]
    fn test_text_editor_commits_buffer() {
        let mut editor = open(ControlKind::TextInput, json!("ab"));
        assert_eq!(editor.handle_key(key(KeyCode::Backspace)), EditorOutcome::Pending);
        editor.handle_key(key(KeyCode::Char('z')));
        assert_eq!(
            editor.handle_key(key(KeyCode::Enter)),
            EditorOutcome::Commit(json!("az"))
        );
    }

    #[test]
    fn test_number_editor_forwards_raw_text() {
        let mut editor = open(ControlKind::NumberInput, json!(4));
        editor.handle_key(key(KeyCode::Char('x')));
        editor.handle_key(key(KeyCode::Char('2')));
        assert_eq!(
            editor.handle_key(key(KeyCode::Enter)),
            EditorOutcome::Commit(json!("42"))
        );
    }

    #[test]
    fn test_textarea_enter_inserts_newline() {
        let mut editor = open(ControlKind::TextArea, json!("a"));
        editor.handle_key(key(KeyCode::Enter));
        editor.handle_key(key(KeyCode::Char('b')));
        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(editor.handle_key(save), EditorOutcome::Commit(json!("a\nb")));
    }

    #[test]
    fn test_escape_cancels() {
        let mut editor = open(ControlKind::Rating, json!(3));
        assert_eq!(editor.handle_key(key(KeyCode::Esc)), EditorOutcome::Cancel);
    }

    #[test]
    fn test_choice_skips_headers_and_disabled() {
        let mut editor = open(ControlKind::Select(entries()), json!("missing"));
        assert!(matches!(editor.kind, EditorKind::Choice { cursor: 1, .. }));

        editor.handle_key(key(KeyCode::Down));
        assert!(matches!(editor.kind, EditorKind::Choice { cursor: 4, .. }));
        editor.handle_key(key(KeyCode::Down));
        assert!(matches!(editor.kind, EditorKind::Choice { cursor: 4, .. }));
        assert_eq!(
            editor.handle_key(key(KeyCode::Enter)),
            EditorOutcome::Commit(json!(3))
        );

        editor.handle_key(key(KeyCode::Up));
        assert!(matches!(editor.kind, EditorKind::Choice { cursor: 1, .. }));
    }

    #[test]
    fn test_choice_starts_on_current_value() {
        let editor = open(ControlKind::Select(entries()), json!("3"));
        assert!(matches!(editor.kind, EditorKind::Choice { cursor: 4, .. }));
    }

    #[test]
    fn test_slider_steps_within_range() {
        assert_eq!(apply_step(StepKind::Slider, &json!(95), 10), json!(100));
        assert_eq!(apply_step(StepKind::Slider, &json!(3), -10), json!(0));
        assert_eq!(apply_step(StepKind::Slider, &json!("x"), 1), json!(1));
    }

    #[test]
    fn test_rating_steps() {
        assert_eq!(apply_step(StepKind::Rating, &json!(2), 1), json!(3));
        assert_eq!(apply_step(StepKind::Rating, &json!(2), 10), json!(5));
        assert_eq!(apply_step(StepKind::Rating, &json!(1), -1), json!(0));
    }

    #[test]
    fn test_date_and_time_steps() {
        assert_eq!(
            apply_step(StepKind::Date, &json!("2024-02-28"), 2),
            json!("2024-03-01")
        );
        assert_eq!(
            apply_step(StepKind::Time, &json!("23:59"), 2),
            json!("00:01")
        );
        assert_eq!(
            apply_step(StepKind::Time, &json!("08:30:15"), -30),
            json!("08:00")
        );
    }

    #[test]
    fn test_stepper_commits_current_value() {
        let mut editor = open(ControlKind::Slider, json!(10));
        editor.handle_key(key(KeyCode::Right));
        editor.handle_key(key(KeyCode::PageUp));
        assert_eq!(
            editor.handle_key(key(KeyCode::Enter)),
            EditorOutcome::Commit(json!(21))
        );
    }
}
