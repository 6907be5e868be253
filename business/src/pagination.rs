//! Client-side pagination over the loaded result set.

/// Rows shown per page.
pub const PAGE_SIZE: usize = 4;

/// Number of pages for `len` rows; an empty set still has one (empty) page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// The rows of 1-indexed `page`. Out-of-range pages yield an empty slice.
pub fn visible_rows<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// The current page of a result set, derived on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow<'a, T> {
    rows: &'a [T],
    current_page: usize,
    total_pages: usize,
}

impl<'a, T> PageWindow<'a, T> {
    pub fn new(all_rows: &'a [T], current_page: usize, page_size: usize) -> Self {
        Self {
            rows: visible_rows(all_rows, current_page, page_size),
            current_page,
            total_pages: total_pages(all_rows.len(), page_size),
        }
    }

    /// Window with the fixed [`PAGE_SIZE`].
    pub fn of(all_rows: &'a [T], current_page: usize) -> Self {
        Self::new(all_rows, current_page, PAGE_SIZE)
    }

    pub fn rows(&self) -> &'a [T] {
        self.rows
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Nothing to show on this page ("data not found").
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page_numbers(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1 && self.current_page <= self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.current_page >= 1 && self.current_page < self.total_pages
    }
}
