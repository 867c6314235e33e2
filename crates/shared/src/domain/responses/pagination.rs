use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: i32 = 10;
pub const MAX_PAGE_SIZE: i32 = 100;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Pagination {
    pub page: i32,
    pub page_size: i32,
    pub total_items: i32,
    pub total_pages: i32,
}

impl Pagination {
    /// Clamps the requested page and page size to sane bounds.
    pub fn normalize(page: i32, page_size: i32) -> (i32, i32) {
        let page = if page > 0 { page } else { 1 };
        let page_size = if page_size > 0 {
            page_size.min(MAX_PAGE_SIZE)
        } else {
            DEFAULT_PAGE_SIZE
        };
        (page, page_size)
    }

    pub fn offset(page: i32, page_size: i32) -> i64 {
        ((page - 1).max(0) as i64) * page_size as i64
    }

    pub fn new(page: i32, page_size: i32, total: i64) -> Self {
        let total_pages = if total > 0 {
            ((total - 1) / page_size as i64) + 1
        } else {
            0
        };

        Self {
            page,
            page_size,
            total_items: total as i32,
            total_pages: total_pages as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_falls_back_to_defaults() {
        assert_eq!(Pagination::normalize(0, 0), (1, DEFAULT_PAGE_SIZE));
        assert_eq!(Pagination::normalize(-3, 500), (1, MAX_PAGE_SIZE));
        assert_eq!(Pagination::normalize(4, 25), (4, 25));
    }

    #[test]
    fn offset_starts_at_zero() {
        assert_eq!(Pagination::offset(1, 10), 0);
        assert_eq!(Pagination::offset(3, 10), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
    }
}
