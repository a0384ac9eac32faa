//! Pre-configured caches for comparison results and token counts.

use std::time::Duration;

use crate::cache::{CacheConfig, TtlCache};
use crate::models::ComparisonResult;

/// Adapter key of the comparison result cache
pub const COMPARISON_CACHE_KEY: &str = "format-comparison-cache";
pub const COMPARISON_CACHE_TTL: Duration = Duration::from_secs(60 * 60);
pub const COMPARISON_CACHE_MAX_ENTRIES: usize = 100;

/// Adapter key of the token count cache
pub const TOKEN_COUNT_CACHE_KEY: &str = "token-count-cache";
pub const TOKEN_COUNT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const TOKEN_COUNT_CACHE_MAX_ENTRIES: usize = 500;

/// Full comparison results keyed by `hash_key(input)`.
pub type ComparisonCache = TtlCache<ComparisonResult>;

/// Token counts keyed by `token_count_key(format, code)`.
pub type TokenCountCache = TtlCache<u64>;

impl CacheConfig {
    pub fn comparisons() -> Self {
        Self::new(
            COMPARISON_CACHE_KEY,
            COMPARISON_CACHE_TTL,
            COMPARISON_CACHE_MAX_ENTRIES,
        )
    }

    pub fn token_counts() -> Self {
        Self::new(
            TOKEN_COUNT_CACHE_KEY,
            TOKEN_COUNT_CACHE_TTL,
            TOKEN_COUNT_CACHE_MAX_ENTRIES,
        )
    }
}
