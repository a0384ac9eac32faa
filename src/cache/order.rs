//! Insertion Order Module
//!
//! FIFO tracking for cache eviction. Reads never reorder keys; only inserts do.

use std::collections::VecDeque;

// == Insertion Order ==
/// Tracks keys by insertion time.
///
/// Keys are stored in a VecDeque where:
/// - Front = Oldest insertion
/// - Back = Newest insertion
#[derive(Debug, Default, Clone)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Rebuild ==
    /// Recomputes the order from `(key, inserted_at)` pairs.
    ///
    /// Ties on the timestamp are broken by key so reloads are deterministic.
    pub fn rebuild<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, u64)>,
    {
        let mut pairs: Vec<(u64, &String)> = entries.into_iter().map(|(k, t)| (t, k)).collect();
        pairs.sort();

        Self {
            order: pairs.into_iter().map(|(_, k)| k.clone()).collect(),
        }
    }

    // == Insert ==
    /// Records `key` as the newest insertion, dropping any earlier position.
    pub fn insert(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the earliest inserted key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek ==
    pub fn oldest(&self) -> Option<&String> {
        self.order.front()
    }

    pub fn newest(&self) -> Option<&String> {
        self.order.back()
    }

    /// Keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }
}
