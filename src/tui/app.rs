//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::event::KeyEvent;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use serde_json::Value;
use tracing::{debug, info};

use crate::control::ControlKind;
use crate::dispatch::{Cell, CellContent};
use crate::model::RowId;
use crate::provider::RowProvider;
use crate::view::{BodyRow, TableBody, TabularView, ViewCell, ViewOutput};

use super::editor::Editor;
use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::{AppState, PopupState};

/// Main TUI application.
pub struct App {
    view: TabularView,
    provider: Box<dyn RowProvider>,
    state: AppState,
    title: String,
    should_quit: bool,
}

impl App {
    /// Creates an app showing `view`, fed by `provider`.
    pub fn new(view: TabularView, provider: Box<dyn RowProvider>) -> Self {
        let mut app = Self {
            view,
            provider,
            state: AppState::new(),
            title: "tabview".to_string(),
            should_quit: false,
        };
        app.provider.sync(&mut app.view);
        app
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn view(&self) -> &TabularView {
        &self.view
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Runs the TUI application until the user quits.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        loop {
            let output = self.view.render();
            let mode = self.view.pages().mode();
            terminal.draw(|frame| render(frame, &mut self.state, &output, &self.title, mode))?;

            match events.next() {
                Ok(Event::Tick) => {
                    self.state.tick();
                    self.provider.sync(&mut self.view);
                }
                Ok(Event::Key(key)) => self.on_key(key),
                Ok(Event::Resize(width, height)) => {
                    debug!(width, height, "terminal resized");
                }
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Handles one key press, then lets the provider push what changed.
    pub fn on_key(&mut self, key: KeyEvent) {
        let action = handle_key(&mut self.state, key);
        self.handle_action(action);
        self.provider.sync(&mut self.view);
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::None => {}
            KeyAction::Quit => self.should_quit = true,
            KeyAction::NextPage => {
                if self.view.next_page() {
                    self.state.cursor_row = 0;
                } else {
                    self.state.set_status("Already on the last page");
                }
            }
            KeyAction::PrevPage => {
                if self.view.prev_page() {
                    self.state.cursor_row = 0;
                } else {
                    self.state.set_status("Already on the first page");
                }
            }
            KeyAction::CyclePageSize(forward) => {
                self.view.cycle_page_size(forward);
                self.state.cursor_row = 0;
                self.state.set_status(format!(
                    "Rows per page: {}",
                    self.view.pages().page_size()
                ));
            }
            KeyAction::Activate => self.activate(),
            KeyAction::Commit { row, column, value } => self.commit(&row, &column, value),
        }
    }

    /// Acts on the cell under the cursor.
    fn activate(&mut self) {
        let ViewOutput::Table(vm) = self.view.render() else {
            return;
        };
        let TableBody::Rows(rows) = &vm.body else {
            return;
        };
        let row = match rows.get(self.state.cursor_row) {
            Some(BodyRow::Rendered(row)) => row,
            Some(BodyRow::Failed { index, reason }) => {
                self.state
                    .set_status(format!("Row {} cannot be edited: {}", index, reason));
                return;
            }
            None => return,
        };
        let Some(cell) = row.cells.get(self.state.cursor_col) else {
            return;
        };

        match cell {
            ViewCell::Action(button) => {
                if self.view.trigger_action(&button.row, &button.action.id) {
                    info!(row = %button.row, action = %button.action.id, "action triggered");
                    self.state
                        .set_status(format!("{}: row {}", button.label(), button.row));
                }
            }
            ViewCell::Field {
                cell: Cell::Control(control) | Cell::Custom(CellContent::Control(control)),
                ..
            } => {
                if *control.kind() == ControlKind::Toggle {
                    let flipped = Value::Bool(!control.value().as_bool().unwrap_or(false));
                    self.commit(&row.id, control.column(), flipped);
                } else if let Some(editor) = Editor::open(row.id.clone(), control) {
                    self.state.popup = PopupState::Editor(editor);
                }
            }
            ViewCell::Field { column, .. } => {
                self.state.set_status(format!("{} is read-only", column));
            }
        }
    }

    /// Applies an edit to the view and hands the value the edited control
    /// forwarded to the provider.
    fn commit(&mut self, row: &RowId, column: &str, value: Value) {
        match self.view.apply_edit(row, column, value) {
            Some(forwarded) => {
                self.provider.commit(row, column, &forwarded);
                self.state
                    .set_status(format!("Updated {} on row {}", column, row));
            }
            None => self.state.set_status(format!("{} is read-only", column)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ChangeHandler, Control};
    use crate::dispatch::RenderError;
    use crate::model::{Action, Column, Row, SemanticType};
    use crate::pagination::PaginationMode;
    use crate::provider::{MemoryProvider, SharedStore};
    use crate::view::TableProps;
    use crossterm::event::{KeyCode, KeyModifiers};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| {
                Row::from_json(json!({"id": i, "done": false, "name": format!("n{}", i), "note": "ro"}))
                    .unwrap()
            })
            .collect()
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("done").with_type(SemanticType::Boolean).editable(),
            Column::new("name").editable(),
            Column::new("note"),
        ]
    }

    fn app(mode: PaginationMode, actions: Vec<Action>) -> (App, SharedStore) {
        let provider = MemoryProvider::new(rows(15), mode);
        let store = provider.store();
        let view = TabularView::new(TableProps {
            columns: Some(columns()),
            actions,
            pagination: mode,
            ..TableProps::default()
        })
        .with_page_sink(provider.page_sink());
        (App::new(view, Box::new(provider)), store)
    }

    fn cursor(app: &mut App, row: usize, col: usize) {
        app.state.set_body_size(10, 4);
        app.state.cursor_row = row;
        app.state.cursor_col = col;
    }

    #[test]
    fn test_toggle_commits_to_store() {
        let (mut app, store) = app(PaginationMode::Client, Vec::new());
        cursor(&mut app, 1, 0);
        app.on_key(key(KeyCode::Enter));

        assert_eq!(store.borrow().rows()[1].get("done"), Some(&json!(true)));
        assert_eq!(app.view().rows()[1].get("done"), Some(&json!(true)));
        assert_eq!(app.state().status_message.as_deref(), Some("Updated done on row 1"));
    }

    #[test]
    fn test_text_edit_round_trip() {
        let (mut app, store) = app(PaginationMode::Client, Vec::new());
        cursor(&mut app, 0, 1);
        app.on_key(key(KeyCode::Enter));
        assert!(matches!(app.state().popup, PopupState::Editor(_)));

        app.on_key(key(KeyCode::Char('!')));
        app.on_key(key(KeyCode::Enter));
        assert!(!app.state().any_popup_open());
        assert_eq!(store.borrow().rows()[0].get("name"), Some(&json!("n0!")));
    }

    #[test]
    fn test_custom_control_commits_raw_value() {
        let provider = MemoryProvider::new(
            vec![Row::from_json(json!({"id": 1, "level": 1})).unwrap()],
            PaginationMode::Client,
        );
        let store = provider.store();
        let level = Column::new("level")
            .with_type(SemanticType::Select)
            .editable()
            .with_renderer(
                |row: &Row, on_change: ChangeHandler| -> Result<CellContent, RenderError> {
                    let value = row.get("level").cloned().unwrap_or(Value::Null);
                    Ok(CellContent::Control(Control::new(
                        ControlKind::TextInput,
                        value,
                        on_change,
                    )))
                },
            );
        let view = TabularView::new(TableProps {
            columns: Some(vec![level]),
            ..TableProps::default()
        });
        let mut app = App::new(view, Box::new(provider));

        app.commit(&RowId::new("1"), "level", json!(2));
        assert_eq!(store.borrow().rows()[0].get("level"), Some(&json!(2)));
    }

    #[test]
    fn test_read_only_cell() {
        let (mut app, store) = app(PaginationMode::Client, Vec::new());
        cursor(&mut app, 0, 2);
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.state().status_message.as_deref(), Some("note is read-only"));
        assert!(!app.state().any_popup_open());
        assert_eq!(store.borrow().revision(), 0);
    }

    #[test]
    fn test_action_cell_fires_trigger() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = fired.clone();
        let action =
            Action::new("open", "Open").with_trigger(move |row| sink.borrow_mut().push(row.clone()));
        let (mut app, _) = app(PaginationMode::Client, vec![action]);
        cursor(&mut app, 2, 3);
        app.on_key(key(KeyCode::Char(' ')));
        assert_eq!(*fired.borrow(), vec![RowId::new("2")]);
    }

    #[test]
    fn test_external_paging_through_provider() {
        let (mut app, store) = app(PaginationMode::External, Vec::new());
        assert_eq!(app.view().rows().len(), 10);

        app.on_key(key(KeyCode::Char('n')));
        assert_eq!(store.borrow().page(), 1);
        assert_eq!(app.view().rows().len(), 5);
        assert_eq!(app.view().rows()[0].id(), Some(RowId::new("10")));

        app.on_key(key(KeyCode::Char('n')));
        assert_eq!(
            app.state().status_message.as_deref(),
            Some("Already on the last page")
        );
    }

    #[test]
    fn test_quit() {
        let (mut app, _) = app(PaginationMode::Client, Vec::new());
        app.on_key(key(KeyCode::Char('q')));
        app.on_key(key(KeyCode::Char('y')));
        assert!(app.should_quit);
    }
}
