//! Pagination utilities for amoCRM list responses.

use serde::Serialize;

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size amoCRM accepts.
pub const MAX_PAGE_SIZE: u32 = 250;

/// A page of results from the amoCRM API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Number of items requested per page.
    pub per_page: u32,
    /// Total number of items across all pages, when the server reports it.
    pub total_items: Option<u64>,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build a page. `next_link` is whether the response carried
    /// `_links.next`; `None` means the response had no link metadata.
    #[must_use]
    pub fn new(
        items: Vec<T>,
        page: u32,
        per_page: u32,
        total_items: Option<u64>,
        next_link: Option<bool>,
    ) -> Self {
        let has_more = match (next_link, total_items) {
            (Some(next), _) => next,
            (None, Some(t)) => (u64::from(page) * u64::from(per_page)) < t,
            (None, None) => per_page > 0 && items.len() >= per_page as usize,
        };
        Self {
            items,
            page,
            per_page,
            total_items,
            has_more,
        }
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_more_from_link() {
        let page: Page<i32> = Page::new(vec![1; 10], 1, 50, None, Some(true));
        assert!(page.has_more);

        let page: Page<i32> = Page::new(vec![1; 50], 1, 50, None, Some(false));
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_has_more_with_total() {
        // Page 1 of 3 (total 120, 50 per page)
        let page: Page<i32> = Page::new(vec![1; 50], 1, 50, Some(120), None);
        assert!(page.has_more);

        // Page 3 of 3
        let page: Page<i32> = Page::new(vec![1; 20], 3, 50, Some(120), None);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_has_more_without_metadata() {
        // Full page suggests more
        let page: Page<i32> = Page::new(vec![1; 50], 1, 50, None, None);
        assert!(page.has_more);

        // Partial page means no more
        let page: Page<i32> = Page::new(vec![1; 5], 1, 50, None, None);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 1, 50, Some(3), None);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.page, 1);
    }
}
