//! Property-based tests for stale-response bookkeeping.

use std::sync::Mutex;

use proptest::prelude::*;
use serde_json::Value;
use vaultdash_shared::config::StaleResponsePolicy;

use super::{Slot, Ticket};

/// Step of a random interleaving of calls on one gateway.
#[derive(Debug, Clone, Copy)]
enum Step {
    Issue,
    Drop(usize),
    Settle(usize),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Issue),
        (0usize..8).prop_map(Step::Drop),
        (0usize..8).prop_map(Step::Settle),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Stored outcomes only ever move forward, and the newest live call
    /// above the stored one is always allowed to store.
    #[test]
    fn prop_discard_stores_newest_live_call(
        steps in prop::collection::vec(arb_step(), 1..60)
    ) {
        let slot: Mutex<Slot<Value>> = Mutex::new(Slot::new());
        let mut live: Vec<Ticket<'_, Value>> = Vec::new();
        let mut last_stored = 0;

        for step in steps {
            match step {
                Step::Issue => live.push(Ticket::issue(&slot)),
                Step::Drop(index) if !live.is_empty() => {
                    let ticket = live.remove(index % live.len());
                    drop(ticket);
                }
                Step::Settle(index) if !live.is_empty() => {
                    let ticket = live.remove(index % live.len());
                    let accepted = slot
                        .lock()
                        .unwrap()
                        .accept(ticket.sequence, StaleResponsePolicy::Discard);
                    if accepted {
                        prop_assert!(ticket.sequence > last_stored);
                        prop_assert!(live.iter().all(|other| other.sequence < ticket.sequence));
                        last_stored = ticket.sequence;
                    }
                    drop(ticket);
                }
                Step::Drop(_) | Step::Settle(_) => {}
            }

            let guard = slot.lock().unwrap();
            prop_assert_eq!(guard.stored, last_stored);
            prop_assert_eq!(guard.live.len(), live.len());
            if let Some(newest) = live.iter().map(|ticket| ticket.sequence).max() {
                prop_assert_eq!(guard.is_newest(newest), newest > last_stored);
            }
        }
    }
}
