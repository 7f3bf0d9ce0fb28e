//! Application state management.

use ratatui::widgets::TableState;

use super::editor::Editor;

/// Status messages stay visible for this many ticks.
const STATUS_TICKS: u8 = 12;

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    #[default]
    None,
    Help,
    Editor(Editor),
    QuitConfirm,
}

/// Frontend state around the view: cursor, popups and the status line.
#[derive(Debug, Default)]
pub struct AppState {
    /// Cursor row within the rendered body.
    pub cursor_row: usize,
    /// Cursor cell within the row, action cells included.
    pub cursor_col: usize,
    /// Body size of the last rendered frame (rows, cells per row).
    pub body_rows: usize,
    pub body_cols: usize,
    pub popup: PopupState,
    /// Scroll offset of the ratatui table.
    pub table_state: TableState,
    pub status_message: Option<String>,
    status_ticks: u8,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn any_popup_open(&self) -> bool {
        self.popup != PopupState::None
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        match &mut self.popup {
            PopupState::Editor(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn close_popup(&mut self) {
        self.popup = PopupState::None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_ticks = STATUS_TICKS;
    }

    /// Ages the status line; clears it once it expires.
    pub fn tick(&mut self) {
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status_message = None;
            }
        }
    }

    /// Records the body size and keeps the cursor inside it.
    pub fn set_body_size(&mut self, rows: usize, cols: usize) {
        self.body_rows = rows;
        self.body_cols = cols;
        self.cursor_row = self.cursor_row.min(rows.saturating_sub(1));
        self.cursor_col = self.cursor_col.min(cols.saturating_sub(1));
    }

    pub fn move_cursor(&mut self, rows: isize, cols: isize) {
        self.cursor_row = step(self.cursor_row, rows, self.body_rows);
        self.cursor_col = step(self.cursor_col, cols, self.body_cols);
    }
}

fn step(pos: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    pos.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stays_in_body() {
        let mut state = AppState::new();
        state.set_body_size(3, 4);
        state.move_cursor(5, 5);
        assert_eq!((state.cursor_row, state.cursor_col), (2, 3));
        state.move_cursor(-9, -1);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 2));

        state.set_body_size(0, 0);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 0));
        state.move_cursor(1, 1);
        assert_eq!((state.cursor_row, state.cursor_col), (0, 0));
    }

    #[test]
    fn test_status_expires() {
        let mut state = AppState::new();
        state.set_status("saved");
        for _ in 0..STATUS_TICKS - 1 {
            state.tick();
        }
        assert_eq!(state.status_message.as_deref(), Some("saved"));
        state.tick();
        assert!(state.status_message.is_none());
    }
}
