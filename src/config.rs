//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::caches::{
    COMPARISON_CACHE_MAX_ENTRIES, COMPARISON_CACHE_TTL, TOKEN_COUNT_CACHE_MAX_ENTRIES,
    TOKEN_COUNT_CACHE_TTL,
};
use crate::history::HistoryLimits;

/// Default adapter quota, matching a typical browser storage budget
pub const DEFAULT_STORAGE_QUOTA: usize = 5 * 1024 * 1024;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the file adapter writes to
    pub storage_dir: PathBuf,
    /// Adapter byte quota, None for unlimited
    pub storage_quota: Option<usize>,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Comparison cache TTL in seconds
    pub comparison_ttl: u64,
    pub comparison_max_entries: usize,
    /// Token count cache TTL in seconds
    pub token_ttl: u64,
    pub token_max_entries: usize,
    pub history: HistoryLimits,
    /// Endpoint of the remote format generator
    pub generator_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORAGE_DIR` - Adapter directory (default: ./data)
    /// - `STORAGE_QUOTA` - Adapter quota in bytes, 0 = unlimited (default: 5 MiB)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `COMPARISON_CACHE_TTL` / `COMPARISON_CACHE_MAX` - Comparison cache settings
    /// - `TOKEN_CACHE_TTL` / `TOKEN_CACHE_MAX` - Token count cache settings
    /// - `HISTORY_MAX_ITEMS` / `HISTORY_MAX_ITEM_SIZE` / `HISTORY_MAX_TOTAL_SIZE` - History budgets
    /// - `GENERATOR_URL` - Remote generator endpoint
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let quota = env_or("STORAGE_QUOTA", DEFAULT_STORAGE_QUOTA);

        Self {
            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            storage_quota: (quota > 0).then_some(quota),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            comparison_ttl: env_or("COMPARISON_CACHE_TTL", defaults.comparison_ttl),
            comparison_max_entries: env_or("COMPARISON_CACHE_MAX", defaults.comparison_max_entries),
            token_ttl: env_or("TOKEN_CACHE_TTL", defaults.token_ttl),
            token_max_entries: env_or("TOKEN_CACHE_MAX", defaults.token_max_entries),
            history: HistoryLimits {
                max_items: env_or("HISTORY_MAX_ITEMS", defaults.history.max_items),
                max_item_size: env_or("HISTORY_MAX_ITEM_SIZE", defaults.history.max_item_size),
                max_total_size: env_or("HISTORY_MAX_TOTAL_SIZE", defaults.history.max_total_size),
                ..defaults.history
            },
            generator_url: env::var("GENERATOR_URL").unwrap_or(defaults.generator_url),
        }
    }

    pub fn comparison_cache(&self) -> CacheConfig {
        CacheConfig {
            default_ttl: Duration::from_secs(self.comparison_ttl),
            max_entries: self.comparison_max_entries,
            ..CacheConfig::comparisons()
        }
    }

    pub fn token_cache(&self) -> CacheConfig {
        CacheConfig {
            default_ttl: Duration::from_secs(self.token_ttl),
            max_entries: self.token_max_entries,
            ..CacheConfig::token_counts()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./data"),
            storage_quota: Some(DEFAULT_STORAGE_QUOTA),
            server_port: 3000,
            cleanup_interval: 60,
            comparison_ttl: COMPARISON_CACHE_TTL.as_secs(),
            comparison_max_entries: COMPARISON_CACHE_MAX_ENTRIES,
            token_ttl: TOKEN_COUNT_CACHE_TTL.as_secs(),
            token_max_entries: TOKEN_COUNT_CACHE_MAX_ENTRIES,
            history: HistoryLimits::default(),
            generator_url: "http://localhost:8787/generate".to_string(),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 60);
        assert_eq!(config.storage_quota, Some(DEFAULT_STORAGE_QUOTA));
        assert_eq!(config.history, HistoryLimits::default());
    }

    #[test]
    fn test_cache_configs_follow_settings() {
        let config = Config {
            comparison_ttl: 5,
            comparison_max_entries: 7,
            ..Config::default()
        };

        let cache = config.comparison_cache();
        assert_eq!(cache.default_ttl, Duration::from_secs(5));
        assert_eq!(cache.max_entries, 7);
        assert_eq!(cache.storage_key, CacheConfig::comparisons().storage_key);
        assert_eq!(config.token_cache(), CacheConfig::token_counts());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "STORAGE_DIR",
            "STORAGE_QUOTA",
            "SERVER_PORT",
            "CLEANUP_INTERVAL",
            "COMPARISON_CACHE_TTL",
            "COMPARISON_CACHE_MAX",
            "TOKEN_CACHE_TTL",
            "TOKEN_CACHE_MAX",
            "HISTORY_MAX_ITEMS",
            "HISTORY_MAX_ITEM_SIZE",
            "HISTORY_MAX_TOTAL_SIZE",
            "GENERATOR_URL",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        let defaults = Config::default();
        assert_eq!(config.storage_dir, defaults.storage_dir);
        assert_eq!(config.server_port, defaults.server_port);
        assert_eq!(config.comparison_max_entries, defaults.comparison_max_entries);
        assert_eq!(config.history, defaults.history);
        assert_eq!(config.generator_url, defaults.generator_url);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("COMPARE_CACHE_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("COMPARE_CACHE_TEST_GARBAGE", 9usize), 9);
        env::remove_var("COMPARE_CACHE_TEST_GARBAGE");
    }
}
