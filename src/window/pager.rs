use serde::Serialize;
use std::ops::Range;

/// Page of a result, with the metadata pagination controls need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
    pub start: usize,
    pub end: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl PageWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// `max(1, ceil(len / page_size))`
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// 1-based page cursor over a result of varying length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size and go back to the first page
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Jump to a page; out-of-range pages are clamped on the next `window`
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self, len: usize) {
        if self.page < total_pages(len, self.page_size) {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Fall back to page 1 when the result shrank below the current page
    ///
    /// Returns true if the page changed.
    pub fn clamp(&mut self, len: usize) -> bool {
        if self.page > total_pages(len, self.page_size) {
            self.page = 1;
            true
        } else {
            false
        }
    }

    /// Clamp, then describe the slice `[(page-1)*size, min(page*size, len))`
    pub fn window(&mut self, len: usize) -> PageWindow {
        self.clamp(len);

        let start = ((self.page - 1) * self.page_size).min(len);
        let end = (self.page * self.page_size).min(len);
        PageWindow {
            page: self.page,
            page_size: self.page_size,
            start,
            end,
            total_count: len,
            total_pages: total_pages(len, self.page_size),
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_minimum_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_window_slices() {
        let mut pager = Pager::new(10);
        pager.set_page(3);

        let window = pager.window(25);
        assert_eq!(window.range(), 20..25);
        assert_eq!(window.total_pages, 3);
        assert_eq!(window.total_count, 25);
        assert!(!window.has_next());
        assert!(window.has_prev());
    }

    #[test]
    fn test_shrink_clamps_to_first_page() {
        let mut pager = Pager::new(10);
        pager.set_page(5);

        assert!(pager.clamp(12));
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.window(12).range(), 0..10);
    }

    #[test]
    fn test_empty_result_single_empty_page() {
        let mut pager = Pager::new(10);
        pager.set_page(2);

        let window = pager.window(0);
        assert_eq!(window.page, 1);
        assert!(window.is_empty());
        assert_eq!(window.total_pages, 1);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut pager = Pager::new(10);
        pager.prev_page();
        assert_eq!(pager.page(), 1);

        pager.next_page(15);
        pager.next_page(15);
        assert_eq!(pager.page(), 2);

        pager.set_page_size(5);
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.page_size(), 5);
    }
}
