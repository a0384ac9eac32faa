//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with FIFO eviction, TTL
//! expiration and write-through persistence to a key-value adapter.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::stats::Counters;
use crate::cache::{CacheConfig, CacheEntry, CacheStats, InsertionOrder};
use crate::clock::Clock;
use crate::error::StorageError;
use crate::storage::KeyValueStore;

// == TTL Cache ==
/// Bounded, expiry-aware cache keyed by string.
///
/// Every mutation rewrites the whole map under `config.storage_key`. Storage
/// failures are logged and never surface to callers; the in-memory map stays
/// authoritative for the life of the process.
pub struct TtlCache<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Insertion order used for eviction
    order: InsertionOrder,
    /// Hit/miss/eviction counters
    counters: Counters,
    config: CacheConfig,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl<T> TtlCache<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    // == Constructor ==
    /// Creates a cache and loads whatever unexpired entries the adapter holds.
    pub fn new(config: CacheConfig, storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let mut cache = Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            counters: Counters::default(),
            config,
            storage,
            clock,
        };
        cache.load();
        cache
    }

    // == Get ==
    /// Returns the value if present and unexpired.
    ///
    /// An expired entry is removed on the spot and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<T> {
        if !self.touch(key) {
            self.counters.record_miss();
            debug!(cache = %self.config.storage_key, key, "cache miss");
            return None;
        }

        self.counters.record_hit();
        debug!(cache = %self.config.storage_key, key, "cache hit");
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    // == Has ==
    /// Presence check with the same lazy-expiry semantics as `get`.
    pub fn has(&mut self, key: &str) -> bool {
        self.touch(key)
    }

    // == Set ==
    /// Stores `value` under `key` with `ttl` (or the configured default).
    ///
    /// Overwriting a key resets its TTL and makes it the newest insertion.
    /// Inserting a new key at capacity evicts the oldest insertion first.
    pub fn set(&mut self, key: &str, value: T, ttl: Option<Duration>) {
        if self.config.max_entries == 0 {
            return;
        }

        let is_overwrite = self.entries.contains_key(key);
        if !is_overwrite && self.entries.len() >= self.config.max_entries {
            self.evict_oldest();
        }

        let ttl = ttl.unwrap_or(self.config.default_ttl);
        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl);
        self.entries.insert(key.to_string(), entry);
        self.order.insert(key);

        self.persist();
    }

    // == Delete ==
    /// Removes `key`. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if !self.remove_entry(key) {
            return false;
        }
        self.persist();
        true
    }

    // == Clear ==
    /// Drops every entry and persists an empty map.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.persist();
    }

    // == Clean Expired ==
    /// Removes every expired entry. Persists only when something was removed.
    pub fn clean_expired(&mut self) -> usize {
        let removed = self.purge_expired();
        if removed > 0 {
            debug!(cache = %self.config.storage_key, removed, "expired entries cleaned");
            self.persist();
        }
        removed
    }

    // == Stats ==
    /// Keys are listed oldest insertion first.
    pub fn stats(&self) -> CacheStats {
        let inserted_at =
            |key: Option<&String>| key.and_then(|k| self.entries.get(k)).map(|e| e.inserted_at);

        CacheStats {
            size: self.entries.len(),
            max_entries: self.config.max_entries,
            keys: self.order.iter().cloned().collect(),
            oldest_timestamp: inserted_at(self.order.oldest()),
            newest_timestamp: inserted_at(self.order.newest()),
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internals ==

    /// True when `key` holds a live entry; purges and persists an expired one.
    fn touch(&mut self, key: &str) -> bool {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(self.clock.now_ms()),
            None => return false,
        };

        if expired {
            debug!(cache = %self.config.storage_key, key, "entry expired");
            self.remove_entry(key);
            self.persist();
            return false;
        }
        true
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            true
        } else {
            false
        }
    }

    fn evict_oldest(&mut self) -> Option<String> {
        let key = self.order.evict_oldest()?;
        self.entries.remove(&key);
        self.counters.record_eviction();
        debug!(cache = %self.config.storage_key, key = %key, "evicted oldest entry");
        Some(key)
    }

    fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }
        expired.len()
    }

    fn load(&mut self) {
        let key = self.config.storage_key.clone();
        let raw = match self.storage.get(&key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return,
            Err(e) => {
                warn!(cache = %key, error = %e, "cache storage unreadable, starting empty");
                return;
            }
        };

        let stored: HashMap<String, CacheEntry<T>> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(cache = %key, error = %e, "discarding corrupted cache blob");
                return;
            }
        };

        let now = self.clock.now_ms();
        let total = stored.len();
        self.entries = stored
            .into_iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .collect();
        self.order = InsertionOrder::rebuild(
            self.entries
                .iter()
                .map(|(key, entry)| (key, entry.inserted_at)),
        );

        // Capacity may have shrunk since the blob was written
        while self.entries.len() > self.config.max_entries {
            if self.evict_oldest().is_none() {
                break;
            }
        }

        let dropped = total - self.entries.len();
        info!(cache = %key, loaded = self.entries.len(), dropped, "cache restored");
        if dropped > 0 {
            self.persist();
        }
    }

    fn write_blob(&self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.entries)?;
        self.storage.set(&self.config.storage_key, &blob)
    }

    fn persist(&mut self) {
        match self.write_blob() {
            Ok(()) => {}
            Err(StorageError::QuotaExceeded) => self.persist_under_pressure(),
            Err(e) => {
                warn!(cache = %self.config.storage_key, error = %e, "cache write skipped");
            }
        }
    }

    /// Shrinks to half capacity and retries the write once.
    fn persist_under_pressure(&mut self) {
        let expired = self.purge_expired();
        let threshold = self.config.pressure_threshold();
        let mut evicted = 0;
        while self.entries.len() > threshold && self.evict_oldest().is_some() {
            evicted += 1;
        }
        warn!(
            cache = %self.config.storage_key,
            expired, evicted, remaining = self.entries.len(),
            "storage quota exceeded, pruned cache before retry"
        );

        if let Err(e) = self.write_blob() {
            warn!(
                cache = %self.config.storage_key,
                error = %e,
                "cache write abandoned, durable copy is stale"
            );
        }
    }
}

impl<T> fmt::Debug for TtlCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("config", &self.config)
            .field("len", &self.entries.len())
            .finish()
    }
}
