//! Storage Module
//!
//! Durable key-value adapters shared by the caches and the history store.
//! Keys and values are strings; writes report quota pressure as a value.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

// == Key-Value Adapter ==
/// Synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or None when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`. Fails with `QuotaExceeded` when the budget is exhausted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Lists every stored key.
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// UTF-8 byte length of the value stored under `key`.
    fn value_size(&self, key: &str) -> Result<Option<usize>, StorageError> {
        Ok(self.get(key)?.map(|value| value.len()))
    }

    /// Sum of value sizes across all keys.
    fn total_size(&self) -> Result<usize, StorageError> {
        let mut total = 0;
        for key in self.keys()? {
            total += self.value_size(&key)?.unwrap_or(0);
        }
        Ok(total)
    }
}
