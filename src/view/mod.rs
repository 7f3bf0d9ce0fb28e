//! Table view component and its view model.

pub mod common;
pub mod table;

pub use common::{
    ActionButton, BodyRow, HeaderCell, PaginationFooter, RowError, TableBody, TableViewModel,
    ViewCell, ViewOutput, ViewRow,
};
pub use table::{LoadError, TableProps, TabularView};
