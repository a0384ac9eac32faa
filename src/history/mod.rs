//! History Module
//!
//! Persistent collection of saved comparisons with content-based
//! deduplication and count/byte budgets.

mod limits;
mod model;
mod search;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use limits::{
    HistoryLimits, AGGRESSIVE_RETENTION, MAX_HISTORY_ITEMS, MAX_ITEM_SIZE, MAX_TOTAL_SIZE,
    NORMAL_RETENTION,
};
pub use model::{normalize_input, HistoryStats, HistoryUpdate, SavedComparison, UpdateOutcome};
pub use store::{HistoryStore, HISTORY_STORAGE_KEY};
