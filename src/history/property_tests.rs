//! Property-Based Tests for History Module
//!
//! Uses proptest to check dedup and budget invariants across save sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;

use crate::clock::ManualClock;
use crate::history::{normalize_input, HistoryLimits, HistoryStore};
use crate::storage::MemoryStorage;

// == Strategies ==
/// Inputs drawn from a small vocabulary with random padding and casing
fn input_strategy() -> impl Strategy<Value = String> {
    ("[ ]{0,2}", prop::sample::select(vec!["order", "Order", "user list", "USER LIST", "invoice"]), "[0-3]", "[ ]{0,2}")
        .prop_map(|(lead, word, n, trail)| format!("{}{} {}{}", lead, word, n, trail))
}

#[derive(Debug, Clone)]
enum HistoryOp {
    /// `tick` advances the clock afterwards; without it the next op shares
    /// the same millisecond.
    Save { input: String, payload: String, tick: bool },
    Delete { index: usize },
}

fn history_op_strategy() -> impl Strategy<Value = HistoryOp> {
    prop_oneof![
        4 => (input_strategy(), "[a-z]{0,40}", any::<bool>())
            .prop_map(|(input, payload, tick)| HistoryOp::Save { input, payload, tick }),
        1 => (0usize..8).prop_map(|index| HistoryOp::Delete { index }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // No two records share a normalized input, the newest wins, both budgets
    // hold after every operation, and a reported save is always stored.
    // Saves may share a timestamp.
    #[test]
    fn prop_dedup_and_budgets(
        max_items in 1usize..6,
        max_total_size in 300usize..1_200,
        ops in prop::collection::vec(history_op_strategy(), 1..30)
    ) {
        let clock = ManualClock::new(1_000);
        let limits = HistoryLimits {
            max_items,
            max_item_size: 250,
            max_total_size,
            ..HistoryLimits::default()
        };
        let store = HistoryStore::with_limits(
            Arc::new(MemoryStorage::new()),
            Arc::new(clock.clone()),
            limits,
        );

        for op in ops {
            match op {
                HistoryOp::Save { input, payload, tick } => {
                    let saved = store.save(&input, json!(payload), None, None);
                    prop_assert!(saved.is_some());
                    if let Some(saved) = saved {
                        let items = store.load();
                        prop_assert!(items.iter().any(|item| item.id == saved.id));
                        prop_assert_eq!(&items[0], &saved);
                    }
                    if tick {
                        clock.advance(1);
                    }
                }
                HistoryOp::Delete { index } => {
                    let items = store.load();
                    if let Some(item) = items.get(index) {
                        prop_assert!(store.delete(&item.id));
                    }
                    clock.advance(1);
                }
            }

            let items = store.load();
            prop_assert!(items.len() <= max_items);

            let total: usize = items.iter().map(|item| item.serialized_size()).sum();
            prop_assert!(total <= max_total_size);

            let keys: HashSet<String> = items.iter().map(|item| item.normalized_input()).collect();
            prop_assert_eq!(keys.len(), items.len());

            for pair in items.windows(2) {
                prop_assert!(pair[0].created_at >= pair[1].created_at);
            }
        }
    }

    // Saving the same normalized input twice leaves one record holding the
    // later result.
    #[test]
    fn prop_resave_replaces(input in input_strategy(), first in "[a-z]{1,10}", second in "[a-z]{1,10}") {
        let clock = ManualClock::new(1_000);
        let store = HistoryStore::new(Arc::new(MemoryStorage::new()), Arc::new(clock.clone()));

        store.save(&input, json!(first), None, None).unwrap();
        clock.advance(5);
        let respelled = format!("  {}  ", input.trim().to_uppercase());
        store.save(&respelled, json!(second.clone()), None, None).unwrap();

        let items = store.load();
        prop_assert_eq!(items.len(), 1);
        prop_assert_eq!(&items[0].result, &json!(second));
        prop_assert_eq!(items[0].created_at, 1_005);
        prop_assert_eq!(normalize_input(&items[0].input_text), normalize_input(&input));
    }

    // Deleting an unknown id is a no-op, and a blank search equals load.
    #[test]
    fn prop_delete_unknown_and_blank_search(inputs in prop::collection::vec(input_strategy(), 0..6)) {
        let clock = ManualClock::new(1_000);
        let store = HistoryStore::new(Arc::new(MemoryStorage::new()), Arc::new(clock.clone()));
        for input in &inputs {
            let _ = store.save(input, json!(1), None, None);
            clock.advance(1);
        }

        let before = store.load();
        prop_assert!(!store.delete("no-such-id"));
        prop_assert_eq!(&store.load(), &before);
        prop_assert_eq!(store.search(""), before);
    }
}
