//! tabview: configuration-driven table view library.
//!
//! The crate is split into a UI-agnostic core and a terminal frontend:
//! - `model` - rows, columns, actions
//! - `schema` - column resolution (explicit or inferred once from data)
//! - `dispatch` - per-cell choice between custom, static and control rendering
//! - `control` - interactive control descriptors and change forwarding
//! - `pagination` - page index/size state and visible-row slicing
//! - `view` - the `TabularView` component and its view model
//! - `config` - JSON document loading
//! - `provider` - row sources that feed a view between events
//! - `fmt` - value formatting helpers
//! - `tui` - ratatui/crossterm rendering of the view model

pub mod config;
pub mod control;
pub mod dispatch;
pub mod fmt;
pub mod model;
pub mod pagination;
pub mod provider;
pub mod schema;
pub mod tui;
pub mod view;
