//! Filter/paginate engine (pure).
//!
//! One generic component used by every table: it borrows the full record
//! set on each render pass, filters it with a caller-supplied match
//! function, and slices out the current page. Nothing is cached; the view
//! is always re-derived from the owner's current contents.

pub mod pagination;

pub use pagination::{PageControl, PaginationControls};

use std::num::NonZeroUsize;
use tracing::debug;

// ===== PageSize / PageNumber =====

/// Number of rows per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Smart constructor: returns `None` for zero.
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    /// The size as a plain number.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(2))
    }
}

/// 1-based page number. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(NonZeroUsize);

impl PageNumber {
    /// The first page.
    pub const FIRST: PageNumber = PageNumber(NonZeroUsize::MIN);

    /// Smart constructor: returns `None` for zero.
    pub fn new(number: usize) -> Option<Self> {
        NonZeroUsize::new(number).map(Self)
    }

    /// Like `new`, but clamps zero up to the first page.
    pub fn clamped(number: usize) -> Self {
        Self::new(number).unwrap_or(Self::FIRST)
    }

    /// The page number as a plain number.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Following page (saturating).
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Preceding page, stopping at the first.
    pub fn prev(self) -> Self {
        Self::clamped(self.get() - 1)
    }
}

impl std::fmt::Display for PageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== Pure functions =====

/// Ordered subsequence of `items` matching `term`.
///
/// The term is lowercased once and handed to `matches`, which must compare
/// against lowercased text. An empty term returns every item in order.
pub fn filter<'a, T, F>(items: &'a [T], term: &str, matches: F) -> Vec<&'a T>
where
    F: Fn(&T, &str) -> bool,
{
    if term.is_empty() {
        return items.iter().collect();
    }

    let term_lower = term.to_lowercase();
    items
        .iter()
        .filter(|item| matches(item, &term_lower))
        .collect()
}

/// Slice `[(page-1)*size, page*size)` of `items`, clamped to bounds.
///
/// A page past the end yields an empty slice.
pub fn paginate<T>(items: &[T], page_size: PageSize, page: PageNumber) -> &[T] {
    let size = page_size.get();
    let start = (page.get() - 1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items: `ceil(total / size)`.
pub fn page_count(total: usize, page_size: PageSize) -> usize {
    total.div_ceil(page_size.get())
}

// ===== PagedTable =====

/// Match function deciding whether an item contains a lowercased term.
pub type Matcher<T> = fn(&T, &str) -> bool;

/// Search term + current page + page size for one table.
///
/// The table never owns rows: `view` borrows them fresh on each render.
#[derive(Debug, Clone)]
pub struct PagedTable<T> {
    term: String,
    current_page: PageNumber,
    page_size: PageSize,
    matcher: Matcher<T>,
}

/// One render pass worth of table data.
#[derive(Debug)]
pub struct TableView<'a, T> {
    /// Rows of the current page, in order.
    pub rows: Vec<&'a T>,
    /// Number of rows matching the filter across all pages.
    pub filtered_total: usize,
    /// Page being shown.
    pub current_page: PageNumber,
    /// One control per page, with the current page active.
    pub controls: PaginationControls,
}

impl<T> PagedTable<T> {
    /// New table on page 1 with no filter.
    pub fn new(page_size: PageSize, matcher: Matcher<T>) -> Self {
        Self {
            term: String::new(),
            current_page: PageNumber::FIRST,
            page_size,
            matcher,
        }
    }

    /// Replace the search term. Always restarts at page 1.
    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.current_page = PageNumber::FIRST;
        debug!(term = %self.term, "Table filter changed");
    }

    /// Drop the search term. Restarts at page 1.
    pub fn clear_filter(&mut self) {
        self.set_filter(String::new());
    }

    /// Current search term (empty when unfiltered).
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Page currently shown.
    pub fn current_page(&self) -> PageNumber {
        self.current_page
    }

    /// Rows per page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Go back to page 1 without touching the filter.
    pub fn reset_page(&mut self) {
        self.current_page = PageNumber::FIRST;
    }

    /// Items of `items` matching the current term.
    pub fn filtered<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        filter(items, &self.term, self.matcher)
    }

    /// Number of pages for the current filter.
    pub fn page_count(&self, items: &[T]) -> usize {
        page_count(self.filtered(items).len(), self.page_size)
    }

    /// Activate page `page` if it exists for the current filter.
    ///
    /// Returns the page that was active before, or `None` (and changes
    /// nothing) when `page` is out of range.
    pub fn activate(&mut self, items: &[T], page: PageNumber) -> Option<PageNumber> {
        if page.get() > self.page_count(items) {
            return None;
        }
        let previous = self.current_page;
        self.current_page = page;
        debug!(from = previous.get(), to = page.get(), "Page activated");
        Some(previous)
    }

    /// Move to the next page if there is one.
    pub fn next_page(&mut self, items: &[T]) -> Option<PageNumber> {
        self.activate(items, self.current_page.next())
    }

    /// Move to the previous page if there is one.
    pub fn prev_page(&mut self, items: &[T]) -> Option<PageNumber> {
        if self.current_page == PageNumber::FIRST {
            return None;
        }
        self.activate(items, self.current_page.prev())
    }

    /// Pull the current page back inside the valid range after rows vanished.
    pub fn clamp_page(&mut self, items: &[T]) {
        let count = self.page_count(items);
        if self.current_page.get() > count {
            self.current_page = PageNumber::clamped(count);
        }
    }

    /// Filter, paginate and build the page controls for `items`.
    pub fn view<'a>(&self, items: &'a [T]) -> TableView<'a, T> {
        let filtered = self.filtered(items);
        let filtered_total = filtered.len();
        let rows = paginate(&filtered, self.page_size, self.current_page).to_vec();
        let controls = PaginationControls::build(filtered_total, self.page_size, self.current_page);

        TableView {
            rows,
            filtered_total,
            current_page: self.current_page,
            controls,
        }
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
