//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

use crate::model::RowId;

use super::editor::EditorOutcome;
use super::state::{AppState, PopupState};

/// Result of handling a key event.
#[derive(Debug, PartialEq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    Quit,
    NextPage,
    PrevPage,
    /// Cycle the page size forward (`true`) or backward.
    CyclePageSize(bool),
    /// Activate the cell under the cursor.
    Activate,
    /// An editor confirmed a new value.
    Commit {
        row: RowId,
        column: String,
        value: Value,
    },
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    match state.popup {
        PopupState::None => handle_normal_mode(state, key),
        PopupState::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter
            ) {
                state.close_popup();
            }
            KeyAction::None
        }
        PopupState::QuitConfirm => handle_quit_confirm(state, key),
        PopupState::Editor(_) => handle_editor(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('y') => {
            state.close_popup();
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') => {
            state.close_popup();
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_editor(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let Some(editor) = state.editor_mut() else {
        return KeyAction::None;
    };
    match editor.handle_key(key) {
        EditorOutcome::Pending => KeyAction::None,
        EditorOutcome::Cancel => {
            state.close_popup();
            KeyAction::None
        }
        EditorOutcome::Commit(value) => {
            let row = editor.row.clone();
            let column = editor.column.clone();
            state.close_popup();
            KeyAction::Commit { row, column, value }
        }
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }
        KeyCode::Char('?') | KeyCode::Char('h') => {
            state.popup = PopupState::Help;
            KeyAction::None
        }

        // Cursor
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_cursor(-1, 0);
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_cursor(1, 0);
            KeyAction::None
        }
        KeyCode::Left => {
            state.move_cursor(0, -1);
            KeyAction::None
        }
        KeyCode::Right | KeyCode::Tab => {
            state.move_cursor(0, 1);
            KeyAction::None
        }
        KeyCode::BackTab => {
            state.move_cursor(0, -1);
            KeyAction::None
        }
        KeyCode::Home => {
            state.cursor_row = 0;
            KeyAction::None
        }
        KeyCode::End => {
            state.cursor_row = state.body_rows.saturating_sub(1);
            KeyAction::None
        }

        // Pages
        KeyCode::PageDown | KeyCode::Char('n') | KeyCode::Char(']') => KeyAction::NextPage,
        KeyCode::PageUp | KeyCode::Char('p') | KeyCode::Char('[') => KeyAction::PrevPage,
        KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::CyclePageSize(true),
        KeyCode::Char('-') => KeyAction::CyclePageSize(false),

        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Activate,
        _ => KeyAction::None,
    }
}
