//! Provider abstraction for row sources.
//!
//! This module defines the `RowProvider` trait that lets the TUI feed a
//! [`TabularView`] from different sources through a unified interface. The
//! view never fetches data itself; the frontend calls [`RowProvider::sync`]
//! after every handled event and the provider pushes whatever changed.

mod memory;

pub use memory::{MemoryProvider, MemoryStore, SharedStore};

use serde_json::Value;

use crate::model::RowId;
use crate::view::TabularView;

/// Source of the rows shown by a view.
pub trait RowProvider {
    /// Pushes pending row updates (and the total item count) into `view`.
    ///
    /// Called after every handled event; implementations should skip the
    /// update when nothing changed so local control state is not churned.
    fn sync(&mut self, view: &mut TabularView);

    /// Commits an edit the user made to `(row, column)`.
    ///
    /// `value` is the form the column's edit callback received. The default
    /// implementation discards it.
    fn commit(&mut self, row: &RowId, column: &str, value: &Value) {
        let _ = (row, column, value);
    }
}
