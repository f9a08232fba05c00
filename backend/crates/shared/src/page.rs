//! Offset Pagination
//!
//! Page/per-page arithmetic shared by the admin and public listings.

use serde::Serialize;

/// Pages shown on each side of the current page in `page_range`
pub const PAGE_WINDOW: u32 = 2;

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// Build a request, rejecting `page == 0` and `per_page` outside `1..=max_per_page`.
    pub fn new(page: u32, per_page: u32, max_per_page: u32) -> Result<Self, String> {
        if page == 0 {
            return Err("page must be at least 1".to_string());
        }
        if per_page == 0 || per_page > max_per_page {
            return Err(format!("per_page must be between 1 and {}", max_per_page));
        }
        Ok(Self { page, per_page })
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

/// Pagination metadata for rendering page controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
    /// Current page ± [`PAGE_WINDOW`], clipped to `[1, total_pages]`
    pub page_range: Vec<u32>,
    pub start_page: u32,
    pub end_page: u32,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        let per_page = i64::from(request.per_page.max(1));
        let total_pages = u32::try_from((total + per_page - 1) / per_page).unwrap_or(u32::MAX);
        let page = request.page;

        let start_page = page.saturating_sub(PAGE_WINDOW).max(1);
        let end_page = page.saturating_add(PAGE_WINDOW).min(total_pages);
        let page_range = (start_page..=end_page).collect();

        Self {
            page,
            per_page: request.per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
            page_range,
            start_page,
            end_page,
        }
    }
}
