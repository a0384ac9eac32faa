//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A cached value plus the metadata needed to decide whether it is still valid.
///
/// Serialized as `{ "data": ..., "insertedAt": <ms>, "ttl": <ms> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Time to live in milliseconds
    pub ttl: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry inserted at `now_ms`.
    pub fn new(data: T, now_ms: u64, ttl: Duration) -> Self {
        Self {
            data,
            inserted_at: now_ms,
            ttl: ttl.as_millis().min(u64::MAX as u128) as u64,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// Valid while `now - inserted_at <= ttl`; the boundary instant itself is
    /// still valid. A clock that moved backwards never expires an entry.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.inserted_at) > self.ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("v".to_string(), 1_000, Duration::from_secs(2));

        assert_eq!(entry.data, "v");
        assert_eq!(entry.inserted_at, 1_000);
        assert_eq!(entry.ttl, 2_000);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(1u32, 0, Duration::from_millis(1_000));

        assert!(!entry.is_expired(500));
        // Exactly at the bound is still valid
        assert!(!entry.is_expired(1_000));
        assert!(entry.is_expired(1_001));
    }

    #[test]
    fn test_clock_going_backwards_does_not_expire() {
        let entry = CacheEntry::new(1u32, 5_000, Duration::from_millis(10));
        assert!(!entry.is_expired(1_000));
    }

    #[test]
    fn test_serialized_field_names() {
        let entry = CacheEntry::new(42u64, 7, Duration::from_millis(9));
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["data"], 42);
        assert_eq!(json["insertedAt"], 7);
        assert_eq!(json["ttl"], 9);
    }
}
