//! Page slicing over a filtered story set.

use std::num::NonZeroUsize;

/// Page size used at startup, after reset, and by the "today" shortcut.
pub const DEFAULT_ITEMS_PER_PAGE: NonZeroUsize = NonZeroUsize::new(50).unwrap();

/// Page sizes offered by the items-per-page selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Number of pages needed to show `count` items, `per_page` at a time.
pub fn total_pages(count: usize, per_page: NonZeroUsize) -> usize {
    count.div_ceil(per_page.get())
}

/// The contiguous slice shown on 1-based `page`.
///
/// Covers `[(page-1)*per_page, page*per_page)` clamped to `items`; a page past
/// the end yields an empty slice. Page `0` is treated as page `1`.
pub fn page_slice<T>(items: &[T], per_page: NonZeroUsize, page: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(per_page.get()).min(items.len());
    let end = page.saturating_mul(per_page.get()).min(items.len());
    &items[start..end]
}

/// Page size and position within the current filtered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    items_per_page: NonZeroUsize,
    current_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            current_page: 1,
        }
    }
}

impl Paginator {
    pub fn items_per_page(&self) -> NonZeroUsize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Change the page size; always returns to the first page.
    pub fn set_items_per_page(&mut self, per_page: NonZeroUsize) {
        self.items_per_page = per_page;
        self.current_page = 1;
    }

    /// Jump to a 1-based page; `0` is treated as `1`.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Return to the first page, keeping the page size.
    pub fn first_page(&mut self) {
        self.current_page = 1;
    }

    pub fn total_pages(&self, count: usize) -> usize {
        total_pages(count, self.items_per_page)
    }

    /// The slice of `items` visible on the current page.
    pub fn current<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_slice(items, self.items_per_page, self.current_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, per(50)), 0);
        assert_eq!(total_pages(1, per(50)), 1);
        assert_eq!(total_pages(50, per(50)), 1);
        assert_eq!(total_pages(51, per(50)), 2);
        assert_eq!(total_pages(125, per(50)), 3);
    }

    #[test]
    fn test_page_slice_125_items() {
        let items: Vec<usize> = (0..125).collect();
        assert_eq!(page_slice(&items, per(50), 1), &items[0..50]);
        assert_eq!(page_slice(&items, per(50), 2), &items[50..100]);
        let last = page_slice(&items, per(50), 3);
        assert_eq!(last.len(), 25);
        assert_eq!(last, &items[100..125]);
        assert!(page_slice(&items, per(50), 4).is_empty());
    }

    #[test]
    fn test_page_slice_far_past_end_and_zero() {
        let items: Vec<usize> = (0..10).collect();
        assert!(page_slice(&items, per(3), usize::MAX).is_empty());
        assert_eq!(page_slice(&items, per(3), 0), &items[0..3]);
    }

    #[test]
    fn test_paginator_resets_on_page_size_change() {
        let mut paginator = Paginator::default();
        assert_eq!(paginator.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
        paginator.go_to(3);
        assert_eq!(paginator.current_page(), 3);
        paginator.set_items_per_page(per(25));
        assert_eq!(paginator.current_page(), 1);
        assert_eq!(paginator.items_per_page().get(), 25);
    }

    #[test]
    fn test_paginator_current_slice() {
        let items: Vec<usize> = (0..30).collect();
        let mut paginator = Paginator::default();
        paginator.set_items_per_page(per(10));
        paginator.go_to(2);
        assert_eq!(paginator.current(&items), &items[10..20]);
        assert_eq!(paginator.total_pages(items.len()), 3);
    }
}
