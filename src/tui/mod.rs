//! Terminal frontend for tabview.
//!
//! Draws a [`TabularView`](crate::view::TabularView) with ratatui and turns
//! key presses into page changes, control edits and action triggers.

mod app;
mod editor;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, PopupState};
