//! Page state and visible-row slicing.
//!
//! The controller mirrors the page index; the authoritative index belongs to
//! the caller, who is told about every page change through the page sink.

use std::fmt;
use std::ops::Range;

use tracing::debug;

/// Receives the new page index on every page change.
pub type PageSink = Box<dyn FnMut(usize)>;

/// Where rows get cut into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    /// The view holds every row and slices the current page itself.
    #[default]
    Client,
    /// The caller delivers exactly one page of rows; nothing is sliced.
    External,
}

/// "first–last of total" summary for the pagination footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    /// One-based index of the first item on the page, 0 when there are none.
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{} of {}", self.first, self.last, self.total)
    }
}

/// Page index and page size of a table.
pub struct PageController {
    page: usize,
    page_size: usize,
    page_size_options: Vec<usize>,
    mode: PaginationMode,
    total_items: usize,
    sink: Option<PageSink>,
}

impl PageController {
    /// Creates a controller on `page` with `page_size` rows per page.
    ///
    /// A zero page size is raised to 1.
    pub fn new(page: usize, page_size: usize, mode: PaginationMode) -> Self {
        let page_size = page_size.max(1);
        Self {
            page,
            page_size,
            page_size_options: vec![page_size],
            mode,
            total_items: 0,
            sink: None,
        }
    }

    /// Sets the external page-index owner.
    pub fn with_sink(mut self, sink: impl FnMut(usize) + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Adds page sizes a frontend may offer. The initial size stays first.
    pub fn with_page_size_options(mut self, options: &[usize]) -> Self {
        for &size in options {
            if size > 0 && !self.page_size_options.contains(&size) {
                self.page_size_options.push(size);
            }
        }
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Sets the item count shown in the footer. It is supplied by the caller
    /// because the local rows may hold only one page.
    pub fn set_total_items(&mut self, total: usize) {
        self.total_items = total;
    }

    /// Index range of the rows to render out of `len` local rows.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        match self.mode {
            PaginationMode::External => 0..len,
            PaginationMode::Client => {
                let start = self.page.saturating_mul(self.page_size).min(len);
                let end = start.saturating_add(self.page_size).min(len);
                start..end
            }
        }
    }

    /// Rows to render.
    pub fn visible<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.visible_range(rows.len())]
    }

    /// Moves to `page` and forwards it to the page sink.
    pub fn change_page(&mut self, page: usize) {
        debug!(from = self.page, to = page, "page change");
        self.page = page;
        if let Some(sink) = self.sink.as_mut() {
            sink(page);
        }
    }

    /// Sets the page size and returns to the first page in the same step.
    ///
    /// The page sink hears about the reset only if the page actually moved.
    pub fn change_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        debug!(from = self.page_size, to = page_size, "page size change");
        self.page_size = page_size;
        if self.page != 0 {
            self.change_page(0);
        }
    }

    /// Cycles to the next (or previous) configured page size.
    pub fn cycle_page_size(&mut self, forward: bool) {
        let options = &self.page_size_options;
        let pos = options
            .iter()
            .position(|&s| s == self.page_size)
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % options.len()
        } else {
            (pos + options.len() - 1) % options.len()
        };
        let size = options[next];
        self.change_page_size(size);
    }

    /// Index of the last page, derived from `total_items`.
    pub fn last_page(&self) -> usize {
        self.total_items.div_ceil(self.page_size).saturating_sub(1)
    }

    pub fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page()
    }

    /// Goes one page forward if there is one.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.change_page(self.page + 1);
        true
    }

    /// Goes one page back if there is one.
    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.change_page(self.page - 1);
        true
    }

    /// A page that starts at or past the last item reads as `0–0 of total`.
    pub fn summary(&self) -> PageSummary {
        let total = self.total_items;
        let start = self.page.saturating_mul(self.page_size);
        if start >= total {
            return PageSummary { first: 0, last: 0, total };
        }
        let last = total.min(start.saturating_add(self.page_size));
        PageSummary { first: start + 1, last, total }
    }
}

impl fmt::Debug for PageController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageController")
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("page_size_options", &self.page_size_options)
            .field("mode", &self.mode)
            .field("total_items", &self.total_items)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_client_slice_last_partial_page() {
        let rows: Vec<usize> = (0..25).collect();
        let pages = PageController::new(2, 10, PaginationMode::Client);
        assert_eq!(pages.visible(&rows), &rows[20..25]);
        assert_eq!(pages.visible(&rows).len(), 5);
    }

    #[test]
    fn test_client_slice_out_of_range_is_empty() {
        let rows: Vec<usize> = (0..5).collect();
        let pages = PageController::new(3, 10, PaginationMode::Client);
        assert!(pages.visible(&rows).is_empty());
    }

    #[test]
    fn test_external_mode_never_slices() {
        let rows: Vec<usize> = (0..25).collect();
        for page in [0, 2, 7] {
            for size in [1, 10, 100] {
                let pages = PageController::new(page, size, PaginationMode::External);
                assert_eq!(pages.visible(&rows), &rows[..]);
            }
        }
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut pages = PageController::new(3, 10, PaginationMode::Client);
        pages.change_page_size(25);
        assert_eq!(pages.page(), 0);
        assert_eq!(pages.page_size(), 25);
    }

    #[test]
    fn test_page_change_is_forwarded() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut pages = PageController::new(0, 10, PaginationMode::External)
            .with_sink(move |p| sink.borrow_mut().push(p));

        pages.change_page(4);
        pages.change_page_size(5);
        pages.change_page_size(10);

        assert_eq!(pages.page(), 0);
        assert_eq!(*seen.borrow(), vec![4, 0]);
    }

    #[test]
    fn test_summary_uses_external_total() {
        let mut pages = PageController::new(1, 10, PaginationMode::External);
        pages.set_total_items(25);
        assert_eq!(pages.summary().to_string(), "11–20 of 25");

        pages.change_page(2);
        assert_eq!(pages.summary().to_string(), "21–25 of 25");
        assert!(!pages.has_next());
        assert_eq!(pages.page_count(), 3);
    }

    #[test]
    fn test_summary_empty() {
        let pages = PageController::new(0, 10, PaginationMode::Client);
        assert_eq!(pages.summary().to_string(), "0–0 of 0");
        assert!(!pages.has_next());
        assert!(!pages.has_prev());
    }

    #[test]
    fn test_summary_past_the_last_item() {
        let mut pages = PageController::new(3, 10, PaginationMode::Client);
        pages.set_total_items(5);
        assert_eq!(pages.summary().to_string(), "0–0 of 5");

        let mut pages = PageController::new(usize::MAX / 2, 10, PaginationMode::Client);
        pages.set_total_items(1);
        assert_eq!(pages.summary().to_string(), "0–0 of 1");
    }

    #[test]
    fn test_next_prev_bounds() {
        let mut pages = PageController::new(0, 10, PaginationMode::Client);
        pages.set_total_items(15);
        assert!(!pages.prev_page());
        assert!(pages.next_page());
        assert_eq!(pages.page(), 1);
        assert!(!pages.next_page());
        assert!(pages.prev_page());
        assert_eq!(pages.page(), 0);
    }

    #[test]
    fn test_cycle_page_size() {
        let mut pages =
            PageController::new(2, 10, PaginationMode::Client).with_page_size_options(&[25, 0, 10, 50]);
        assert_eq!(pages.page_size_options(), &[10, 25, 50]);

        pages.cycle_page_size(true);
        assert_eq!((pages.page_size(), pages.page()), (25, 0));
        pages.cycle_page_size(true);
        assert_eq!(pages.page_size(), 50);
        pages.cycle_page_size(true);
        assert_eq!(pages.page_size(), 10);
        pages.cycle_page_size(false);
        assert_eq!(pages.page_size(), 50);
    }

    #[test]
    fn test_zero_page_size_is_raised() {
        let mut pages = PageController::new(0, 0, PaginationMode::Client);
        assert_eq!(pages.page_size(), 1);
        pages.change_page_size(0);
        assert_eq!(pages.page_size(), 1);
    }
}
