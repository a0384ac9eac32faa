//! Cache Statistics Module
//!
//! Snapshot of cache contents plus hit, miss and eviction counters.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of a cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,
    /// Capacity
    pub max_entries: usize,
    /// Keys from oldest to newest insertion
    pub keys: Vec<String>,
    /// Earliest insertion timestamp among live entries
    pub oldest_timestamp: Option<u64>,
    /// Latest insertion timestamp among live entries
    pub newest_timestamp: Option<u64>,
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups (absent or expired)
    pub misses: u64,
    /// Number of entries evicted for capacity
    pub evictions: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Counters ==
/// Running counters owned by a cache instance.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Counters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Counters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_zero_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_calculation() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..CacheStats::default()
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_counters_record() {
        let mut counters = Counters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_miss();
        counters.record_eviction();

        assert_eq!(counters.hits, 2);
        assert_eq!(counters.misses, 1);
        assert_eq!(counters.evictions, 1);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = CacheStats {
            size: 1,
            max_entries: 10,
            keys: vec!["k".to_string()],
            oldest_timestamp: Some(5),
            newest_timestamp: Some(5),
            ..CacheStats::default()
        };
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["maxEntries"], 10);
        assert_eq!(json["oldestTimestamp"], 5);
        assert_eq!(json["keys"][0], "k");
    }
}
