//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check capacity, expiry and persistence invariants.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheConfig, TtlCache};
use crate::clock::ManualClock;
use crate::storage::MemoryStorage;

// == Test Configuration ==
const TEST_DEFAULT_TTL: Duration = Duration::from_secs(300);

fn new_cache(max_entries: usize, storage: Arc<MemoryStorage>, clock: &ManualClock) -> TtlCache<String> {
    let config = CacheConfig::new("prop-cache", TEST_DEFAULT_TTL, max_entries);
    TtlCache::new(config, storage, Arc::new(clock.clone()))
}

// == Strategies ==
/// Small key alphabet so sequences revisit keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String, ttl_ms: u64 },
    Get { key: String },
    Delete { key: String },
    Advance { ms: u64 },
    CleanExpired,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy(), 1u64..2_000)
            .prop_map(|(key, value, ttl_ms)| CacheOp::Set { key, value, ttl_ms }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
        (0u64..1_500).prop_map(|ms| CacheOp::Advance { ms }),
        Just(CacheOp::CleanExpired),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // After any operation sequence the cache never exceeds capacity and its
    // stats agree with what lookups observe.
    #[test]
    fn prop_capacity_never_exceeded(
        max_entries in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let clock = ManualClock::new(0);
        let mut cache = new_cache(max_entries, Arc::new(MemoryStorage::new()), &clock);
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl_ms } => {
                    cache.set(&key, value, Some(Duration::from_millis(ttl_ms)));
                }
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Delete { key } => {
                    cache.delete(&key);
                }
                CacheOp::Advance { ms } => clock.advance(ms),
                CacheOp::CleanExpired => {
                    cache.clean_expired();
                }
            }
            prop_assert!(cache.len() <= max_entries);
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.size, cache.len());
        prop_assert_eq!(stats.keys.len(), cache.len());
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
    }

    // A value is returned while `now - inserted_at <= ttl` and is gone after.
    #[test]
    fn prop_ttl_bound(
        key in key_strategy(),
        value in value_strategy(),
        ttl_ms in 1u64..10_000,
        elapsed in 0u64..20_000
    ) {
        let clock = ManualClock::new(1_000);
        let mut cache = new_cache(10, Arc::new(MemoryStorage::new()), &clock);

        cache.set(&key, value.clone(), Some(Duration::from_millis(ttl_ms)));
        clock.advance(elapsed);

        if elapsed <= ttl_ms {
            prop_assert_eq!(cache.get(&key), Some(value));
        } else {
            prop_assert_eq!(cache.get(&key), None);
            prop_assert!(cache.is_empty());
        }
    }

    // Filling past capacity with distinct keys evicts in insertion order.
    #[test]
    fn prop_fifo_eviction_order(
        keys in prop::collection::hash_set("[a-z]{1,8}", 3..12),
        capacity in 2usize..4
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let clock = ManualClock::new(0);
        let mut cache = new_cache(capacity, Arc::new(MemoryStorage::new()), &clock);

        for key in &keys {
            cache.set(key, key.clone(), None);
            clock.advance(1);
        }

        let survivors: HashSet<String> = cache.stats().keys.into_iter().collect();
        let expected: HashSet<String> = keys[keys.len() - capacity..].iter().cloned().collect();
        prop_assert_eq!(survivors, expected);
    }

    // A reloaded cache serves exactly the unexpired entries it persisted.
    #[test]
    fn prop_reload_matches_live_state(
        ops in prop::collection::vec(cache_op_strategy(), 1..40)
    ) {
        let storage = Arc::new(MemoryStorage::new());
        let clock = ManualClock::new(0);
        let mut cache = new_cache(5, storage.clone(), &clock);

        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl_ms } => {
                    cache.set(&key, value, Some(Duration::from_millis(ttl_ms)));
                }
                CacheOp::Delete { key } => {
                    cache.delete(&key);
                }
                CacheOp::Advance { ms } => clock.advance(ms),
                _ => {}
            }
        }
        cache.clean_expired();

        let mut reloaded = new_cache(5, storage, &clock);
        let mut live: Vec<String> = cache.stats().keys;
        let mut restored: Vec<String> = reloaded.stats().keys;
        live.sort();
        restored.sort();
        prop_assert_eq!(&live, &restored);

        for key in live {
            prop_assert_eq!(reloaded.get(&key), cache.get(&key));
        }
    }
}
