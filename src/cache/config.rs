//! Per-instance cache configuration.

use std::time::Duration;

/// Immutable settings for one `TtlCache`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL applied when `set` is called without one
    pub default_ttl: Duration,
    /// Maximum number of live entries
    pub max_entries: usize,
    /// Adapter key the cache persists under
    pub storage_key: String,
}

impl CacheConfig {
    pub fn new(storage_key: impl Into<String>, default_ttl: Duration, max_entries: usize) -> Self {
        Self {
            default_ttl,
            max_entries,
            storage_key: storage_key.into(),
        }
    }

    /// Entry count the cache shrinks to when the adapter runs out of quota.
    pub fn pressure_threshold(&self) -> usize {
        self.max_entries / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_threshold_is_half_capacity() {
        let config = CacheConfig::new("k", Duration::from_secs(1), 9);
        assert_eq!(config.pressure_threshold(), 4);
        assert_eq!(config.storage_key, "k");
    }
}
