//! Client-side pagination for the appointments table.

/// Rows per page in the appointments table
pub const APPOINTMENTS_PER_PAGE: usize = 10;

/// A page window over a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub per_page: usize,
    pub total: usize,
}

impl Pager {
    pub fn new(total: usize, per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            total,
        }
    }

    /// Number of pages (`ceil(total / per_page)`); zero for an empty list
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.per_page)
    }

    /// Clamp a page index into range
    pub fn clamp(&self, page: usize) -> usize {
        page.min(self.page_count().saturating_sub(1))
    }

    /// Item slice for page `page` (zero-based)
    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let start = (self.clamp(page) * self.per_page).min(items.len());
        let end = (start + self.per_page).min(items.len());
        &items[start..end]
    }

    pub fn has_previous(&self, page: usize) -> bool {
        page > 0
    }

    pub fn has_next(&self, page: usize) -> bool {
        page + 1 < self.page_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(Pager::new(0, 10).page_count(), 0);
        assert_eq!(Pager::new(10, 10).page_count(), 1);
        assert_eq!(Pager::new(11, 10).page_count(), 2);
        assert_eq!(Pager::new(25, APPOINTMENTS_PER_PAGE).page_count(), 3);
    }

    #[test]
    fn test_slices() {
        let items: Vec<u32> = (0..25).collect();
        let pager = Pager::new(items.len(), 10);

        assert_eq!(pager.slice(&items, 0), &items[0..10]);
        assert_eq!(pager.slice(&items, 2), &items[20..25]);
        // past the end clamps to the last page
        assert_eq!(pager.slice(&items, 9), &items[20..25]);
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<u32> = Vec::new();
        let pager = Pager::new(0, 10);
        assert!(pager.slice(&items, 0).is_empty());
        assert!(!pager.has_next(0));
        assert!(!pager.has_previous(0));
    }

    #[test]
    fn test_navigation_flags() {
        let pager = Pager::new(21, 10);
        assert!(pager.has_next(0));
        assert!(pager.has_next(1));
        assert!(!pager.has_next(2));
        assert!(pager.has_previous(2));
    }
}
