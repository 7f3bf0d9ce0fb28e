//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::pagination::PaginationMode;
use crate::tui::style::Styles;
use crate::view::ViewOutput;

use super::state::{AppState, PopupState};
use super::widgets::{
    render_editor, render_footer, render_header, render_help, render_help_line, render_message,
    render_quit_confirm, render_table,
};

/// Main render function.
pub fn render(
    frame: &mut Frame,
    state: &mut AppState,
    output: &ViewOutput,
    title: &str,
    mode: PaginationMode,
) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Table
        Constraint::Length(1), // Pagination footer
        Constraint::Length(1), // Key hints / status
    ])
    .split(area);

    render_header(frame, chunks[0], title, mode);

    match output {
        ViewOutput::Loading(content) => {
            state.set_body_size(0, 0);
            render_message(frame, chunks[1], title, content, Styles::dim());
        }
        ViewOutput::Error(message) => {
            state.set_body_size(0, 0);
            render_message(frame, chunks[1], title, message, Styles::error());
        }
        ViewOutput::Table(vm) => {
            let cols = vm
                .rows()
                .map(|r| r.cells.len())
                .max()
                .unwrap_or(0);
            state.set_body_size(vm.body_len(), cols);
            render_table(frame, chunks[1], state, vm, title);
            render_footer(frame, chunks[2], &vm.footer);
        }
    }

    render_help_line(frame, chunks[3], state.status_message.as_deref());

    // Popups are rendered last to overlay everything.
    match &state.popup {
        PopupState::None => {}
        PopupState::Help => render_help(frame, area),
        PopupState::Editor(editor) => render_editor(frame, area, editor),
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
    }
}
