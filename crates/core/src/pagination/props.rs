//! Property-based tests for pagination display and pager transitions.

use proptest::prelude::*;
use vaultdash_shared::types::PageWindow;

use super::pager::Pager;
use super::window::{can_go_next, can_go_previous, summary};

/// Strategy for server windows with a realistic page size.
fn arb_window() -> impl Strategy<Value = PageWindow> {
    (1u32..=50, 0u64..=500).prop_map(|(per_page, total_records)| PageWindow {
        page: 1,
        number_of_records_per_page: per_page,
        total_records,
        total_pages: u32::try_from(total_records.div_ceil(u64::from(per_page))).unwrap_or(0),
    })
}

/// Pager action drawn for random walks.
#[derive(Debug, Clone, Copy)]
enum Action {
    Next,
    Previous,
    Refresh,
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Next), Just(Action::Previous), Just(Action::Refresh)]
}

/// Parses "Showing X to Y of Z transactions" back into numbers.
fn parse_range(text: &str) -> Option<(u64, u64, u64)> {
    let rest = text.strip_prefix("Showing ")?.strip_suffix(" transactions")?;
    let (from, rest) = rest.split_once(" to ")?;
    let (to, total) = rest.split_once(" of ")?;
    Some((from.parse().ok()?, to.parse().ok()?, total.parse().ok()?))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The summary follows the documented formula on every page in range.
    #[test]
    fn prop_summary_matches_formula(window in arb_window(), page_seed in 0u32..1000) {
        let pages = window.total_pages.max(1);
        let page = page_seed % pages + 1;
        let text = summary(page, &window);

        match window.total_records {
            0 => prop_assert_eq!(text, "Showing 0 transactions"),
            1 => prop_assert_eq!(text, "Showing 1 transaction"),
            total => {
                let (from, to, reported) = parse_range(&text).unwrap();
                let per_page = u64::from(window.number_of_records_per_page);
                prop_assert_eq!(reported, total);
                prop_assert_eq!(from, (u64::from(page) - 1) * per_page + 1);
                prop_assert_eq!(to, (u64::from(page) * per_page).min(total));
                prop_assert!(from <= to);
                prop_assert!(to - from < per_page);
            }
        }
    }

    /// Nothing is clickable while a fetch is in flight.
    #[test]
    fn prop_in_flight_disables_both(window in arb_window(), page in 1u32..100) {
        prop_assert!(!can_go_previous(page, true));
        prop_assert!(!can_go_next(
            page,
            window.number_of_records_per_page,
            window.total_records,
            true
        ));
    }

    /// "Next" is enabled exactly when a later page exists.
    #[test]
    fn prop_next_enabled_iff_more_records(window in arb_window(), page in 1u32..100) {
        let enabled = can_go_next(
            page,
            window.number_of_records_per_page,
            window.total_records,
            false,
        );
        prop_assert_eq!(enabled, page < window.total_pages);
    }

    /// Random walks never leave the range of pages the server reported.
    #[test]
    fn prop_pager_walk_stays_in_range(
        window in arb_window(),
        actions in prop::collection::vec(arb_action(), 0..40)
    ) {
        let mut pager = Pager::new();
        pager.refresh();
        pager.settle(Some(window));

        for action in actions {
            let issued = match action {
                Action::Next => pager.next(),
                Action::Previous => pager.previous(),
                Action::Refresh => Some(pager.refresh()),
            };
            if let Some(command) = issued {
                prop_assert_eq!(command.page, pager.page());
                prop_assert!(pager.in_flight());
            }
            pager.settle(Some(PageWindow { page: pager.page(), ..window }));

            prop_assert!(pager.page() >= 1);
            prop_assert!(pager.page() <= window.total_pages.max(1));
        }
    }
}
