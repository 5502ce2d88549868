//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Request parameters for a page-indexed list endpoint.
///
/// Page size is dictated by the server, so only the page number is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Creates a request for `page`, clamped to the first page.
    #[must_use]
    pub fn new(page: u32) -> Self {
        Self { page: page.max(1) }
    }

    /// Builds `<resource>?page=<page>`.
    #[must_use]
    pub fn path_for(&self, resource: &str) -> String {
        format!("{resource}?page={}", self.page)
    }
}

/// Server-reported pagination metadata.
///
/// Every list endpoint returns these fields alongside its items. They are
/// taken as reported and never recomputed client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    /// Page the server answered for.
    pub page: u32,
    /// Server-dictated page size.
    pub number_of_records_per_page: u32,
    /// Total number of records across all pages.
    pub total_records: u64,
    /// Total number of pages.
    pub total_pages: u32,
}
