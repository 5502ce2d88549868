//! Display rules for a paginated list.

use vaultdash_shared::types::PageWindow;

/// Text shown under a paginated list.
///
/// `page` is the client-owned page, not the one echoed by the server.
#[must_use]
pub fn summary(page: u32, window: &PageWindow) -> String {
    match window.total_records {
        0 => "Showing 0 transactions".to_string(),
        1 => "Showing 1 transaction".to_string(),
        total => {
            let page = u64::from(page.max(1));
            let per_page = u64::from(window.number_of_records_per_page);
            let from = (page - 1).saturating_mul(per_page).saturating_add(1);
            let to = page.saturating_mul(per_page).min(total);
            format!("Showing {from} to {to} of {total} transactions")
        }
    }
}

/// Whether "Previous" is enabled.
#[must_use]
pub fn can_go_previous(page: u32, in_flight: bool) -> bool {
    page > 1 && !in_flight
}

/// Whether "Next" is enabled.
#[must_use]
pub fn can_go_next(page: u32, per_page: u32, total_records: u64, in_flight: bool) -> bool {
    total_records != 0
        && u64::from(page).saturating_mul(u64::from(per_page)) < total_records
        && !in_flight
}
