//! Pagination parameters shared by the listing use-cases.

/// A one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u64,
    per_page: u64,
}

impl Page {
    pub const DEFAULT_PER_PAGE: u64 = 100;

    /// Build a page request; a `page` of zero is treated as the first page.
    #[must_use]
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page,
        }
    }

    #[must_use]
    pub fn number(self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn per_page(self) -> u64 {
        self.per_page
    }

    /// Row offset of the first record on this page.
    #[must_use]
    pub fn offset(self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_first_page_of_one_hundred() {
        let page = Page::default();
        assert_eq!(page.number(), 1);
        assert_eq!(page.per_page(), 100);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn should_compute_offset_from_page_number() {
        let page = Page::new(3, 25);
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn should_clamp_page_zero_to_first_page() {
        let page = Page::new(0, 10);
        assert_eq!(page.number(), 1);
        assert_eq!(page.offset(), 0);
    }
}
