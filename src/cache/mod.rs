//! Cache Module
//!
//! Generic bounded cache with TTL expiration, FIFO eviction and
//! write-through persistence to a key-value adapter.

mod config;
mod entry;
mod order;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use config::CacheConfig;
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::TtlCache;
