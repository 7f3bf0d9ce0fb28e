//! In-memory row provider.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info};

use super::RowProvider;
use crate::model::{Row, RowId};
use crate::pagination::PaginationMode;
use crate::view::TabularView;

/// Rows held in memory plus the authoritative page index.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<Row>,
    page: usize,
    /// Bumped on every mutation.
    revision: u64,
}

/// Store handle shared with callbacks (page sink, action triggers).
pub type SharedStore = Rc<RefCell<MemoryStore>>;

impl MemoryStore {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            page: 0,
            revision: 0,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Records the page the view asked for.
    pub fn set_page(&mut self, page: usize) {
        if self.page != page {
            self.page = page;
            self.revision += 1;
        }
    }

    /// Writes `value` into `column` of row `id`. Returns `false` if there
    /// is no such row.
    pub fn set(&mut self, id: &RowId, column: &str, value: Value) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.id().as_ref() == Some(id)) else {
            return false;
        };
        row.set(column, value);
        self.revision += 1;
        true
    }

    /// Removes row `id`. Returns `false` if there is no such row.
    pub fn remove(&mut self, id: &RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id().as_ref() != Some(id));
        if self.rows.len() == before {
            return false;
        }
        self.revision += 1;
        true
    }

    /// Rows of page `page` with `page_size` rows per page.
    pub fn page_rows(&self, page: usize, page_size: usize) -> Vec<Row> {
        self.rows
            .iter()
            .skip(page.saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SyncKey {
    revision: u64,
    page_size: usize,
}

/// Feeds a view from a [`MemoryStore`].
///
/// In client mode the view gets every row and slices pages itself. In
/// external mode the provider plays the caller that owns the page index:
/// it serves exactly the page recorded through [`MemoryProvider::page_sink`].
#[derive(Debug)]
pub struct MemoryProvider {
    store: SharedStore,
    mode: PaginationMode,
    synced: Option<SyncKey>,
}

impl MemoryProvider {
    pub fn new(rows: Vec<Row>, mode: PaginationMode) -> Self {
        Self {
            store: Rc::new(RefCell::new(MemoryStore::new(rows))),
            mode,
            synced: None,
        }
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }

    /// Page sink to hand to the view: records the requested page.
    pub fn page_sink(&self) -> impl FnMut(usize) + 'static {
        let store = self.store.clone();
        move |page| store.borrow_mut().set_page(page)
    }

    /// Rows and total count the view should get right now.
    pub fn snapshot(&self, page_size: usize) -> (Vec<Row>, usize) {
        let store = self.store.borrow();
        let rows = match self.mode {
            PaginationMode::Client => store.rows().to_vec(),
            PaginationMode::External => store.page_rows(store.page(), page_size),
        };
        (rows, store.len())
    }
}

impl RowProvider for MemoryProvider {
    fn sync(&mut self, view: &mut TabularView) {
        let key = SyncKey {
            revision: self.store.borrow().revision(),
            page_size: view.pages().page_size(),
        };
        if self.synced == Some(key) {
            return;
        }
        let (rows, total) = self.snapshot(key.page_size);
        debug!(rows = rows.len(), total, revision = key.revision, "sync rows");
        view.set_rows(rows);
        view.set_total_items(total);
        self.synced = Some(key);
    }

    fn commit(&mut self, row: &RowId, column: &str, value: &Value) {
        if self.store.borrow_mut().set(row, column, value.clone()) {
            info!(row = %row, column, value = %value, "edit committed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{TableProps, ViewOutput};
    use serde_json::json;

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row::from_json(json!({"id": i, "v": i * 10})).unwrap())
            .collect()
    }

    fn body_ids(view: &TabularView) -> Vec<String> {
        match view.render() {
            ViewOutput::Table(t) => t.rows().map(|r| r.id.to_string()).collect(),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_store_set_and_remove() {
        let mut store = MemoryStore::new(rows(3));
        assert!(store.set(&RowId::new("1"), "v", json!(99)));
        assert_eq!(store.rows()[1].get("v"), Some(&json!(99)));
        assert!(!store.set(&RowId::new("7"), "v", json!(1)));

        assert!(store.remove(&RowId::new("0")));
        assert!(!store.remove(&RowId::new("0")));
        assert_eq!(store.len(), 2);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_page_rows() {
        let store = MemoryStore::new(rows(25));
        let page = store.page_rows(2, 10);
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].id(), Some(RowId::new("20")));
        assert!(store.page_rows(9, 10).is_empty());
    }

    #[test]
    fn test_client_mode_sync() {
        let mut provider = MemoryProvider::new(rows(25), PaginationMode::Client);
        let mut view = TabularView::new(TableProps::default());

        provider.sync(&mut view);
        assert_eq!(view.rows().len(), 25);
        assert_eq!(view.pages().total_items(), 25);
        assert_eq!(body_ids(&view).len(), 10);
    }

    #[test]
    fn test_external_mode_serves_requested_page() {
        let mut provider = MemoryProvider::new(rows(25), PaginationMode::External);
        let mut view = TabularView::new(TableProps {
            pagination: PaginationMode::External,
            ..TableProps::default()
        })
        .with_page_sink(provider.page_sink());

        provider.sync(&mut view);
        assert_eq!(body_ids(&view), (0..10).map(|i| i.to_string()).collect::<Vec<_>>());

        view.change_page(2);
        provider.sync(&mut view);
        assert_eq!(body_ids(&view), vec!["20", "21", "22", "23", "24"]);
        assert_eq!(view.pages().total_items(), 25);

        view.change_page_size(5);
        provider.sync(&mut view);
        assert_eq!(view.pages().page(), 0);
        assert_eq!(body_ids(&view), vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_commit_flows_back_on_sync() {
        let mut provider = MemoryProvider::new(rows(2), PaginationMode::Client);
        let mut view = TabularView::new(TableProps::default());
        provider.sync(&mut view);

        provider.commit(&RowId::new("1"), "v", &json!(5));
        provider.sync(&mut view);
        assert_eq!(view.rows()[1].get("v"), Some(&json!(5)));
    }

    #[test]
    fn test_sync_picks_up_store_mutations() {
        let mut provider = MemoryProvider::new(rows(2), PaginationMode::Client);
        let mut view = TabularView::new(TableProps::default());
        provider.sync(&mut view);

        provider.store().borrow_mut().remove(&RowId::new("0"));
        assert_eq!(view.rows().len(), 2);
        provider.sync(&mut view);
        assert_eq!(view.rows().len(), 1);
    }
}
