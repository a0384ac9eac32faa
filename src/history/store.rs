//! History Store Module
//!
//! Persistent, deduplicated list of saved comparisons under count and byte
//! budgets. Holds no state between calls: every operation reloads the blob,
//! validates it, mutates, and rewrites the whole collection. Each mutation
//! therefore costs O(total serialized history size).

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::limits::HistoryLimits;
use super::model::{
    dedupe_newest_first, HistoryStats, HistoryUpdate, SavedComparison, UpdateOutcome,
};
use super::search::{has_any_tag, matches_query};
use crate::clock::Clock;
use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Adapter key the history blob lives under
pub const HISTORY_STORAGE_KEY: &str = "comparison-history";

// == History Store ==
pub struct HistoryStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    limits: HistoryLimits,
    storage_key: String,
}

impl HistoryStore {
    // == Constructors ==
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_limits(storage, clock, HistoryLimits::default())
    }

    pub fn with_limits(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        limits: HistoryLimits,
    ) -> Self {
        Self {
            storage,
            clock,
            limits,
            storage_key: HISTORY_STORAGE_KEY.to_string(),
        }
    }

    // == Save ==
    /// Persists a new comparison, replacing any record with the same
    /// normalized input.
    ///
    /// Returns None when the input is blank, the record is oversized, or the
    /// write could not be completed.
    pub fn save(
        &self,
        input_text: &str,
        result: Value,
        tags: Option<BTreeSet<String>>,
        notes: Option<String>,
    ) -> Option<SavedComparison> {
        let input = input_text.trim();
        if input.is_empty() {
            debug!("history save rejected: empty input");
            return None;
        }

        let candidate = SavedComparison {
            id: Uuid::new_v4().to_string(),
            created_at: self.clock.now_ms(),
            input_text: input.to_string(),
            result,
            tags: tags.filter(|tags| !tags.is_empty()),
            notes: notes.filter(|notes| !notes.trim().is_empty()),
        };

        let size = candidate.serialized_size();
        if size > self.limits.max_item_size {
            warn!(
                size,
                max = self.limits.max_item_size,
                "history save rejected: record too large"
            );
            return None;
        }

        let key = candidate.normalized_input();
        let mut items = self.load();
        let before = items.len();
        items.retain(|item| item.normalized_input() != key);
        if items.len() < before {
            debug!("replacing earlier history record with the same input");
        }
        items.insert(0, candidate.clone());

        let kept = self.commit(items)?;
        if !kept.iter().any(|item| item.id == candidate.id) {
            warn!(size, "history save dropped by storage budget");
            return None;
        }
        Some(candidate)
    }

    // == Load ==
    /// Returns every valid record, deduplicated, newest first.
    ///
    /// Structurally invalid records are dropped and the cleaned list is
    /// written back. An unparsable blob reads as empty.
    pub fn load(&self) -> Vec<SavedComparison> {
        let raw = match self.storage.get(&self.storage_key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "history storage unreadable");
                return Vec::new();
            }
        };

        let entries: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "discarding corrupted history blob");
                return Vec::new();
            }
        };

        let total = entries.len();
        let valid = parse_records(entries);

        if valid.len() < total {
            warn!(dropped = total - valid.len(), "dropped invalid history records");
            if let Err(e) = self.write(&valid) {
                warn!(error = %e, "could not rewrite cleaned history");
            }
        }

        dedupe_newest_first(valid)
    }

    // == Lookups ==
    pub fn get_by_id(&self, id: &str) -> Option<SavedComparison> {
        self.load().into_iter().find(|item| item.id == id)
    }

    /// Case-insensitive match on input, then tags, then notes.
    /// A blank query returns the full history.
    pub fn search(&self, query: &str) -> Vec<SavedComparison> {
        self.find(query, &[])
    }

    /// Records carrying any of `tags`. No tags returns the full history.
    pub fn filter_by_tags(&self, tags: &[String]) -> Vec<SavedComparison> {
        self.find("", tags)
    }

    /// Records matching `query` that also carry any of `tags`. A blank query
    /// or an empty tag list skips that filter.
    pub fn find(&self, query: &str, tags: &[String]) -> Vec<SavedComparison> {
        let query = query.trim().to_lowercase();
        self.load()
            .into_iter()
            .filter(|item| query.is_empty() || matches_query(item, &query))
            .filter(|item| tags.is_empty() || has_any_tag(item, tags))
            .collect()
    }

    // == Delete ==
    /// Removes the record with `id`. Unknown ids leave storage untouched.
    pub fn delete(&self, id: &str) -> bool {
        let mut items = self.load();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return false;
        }

        match self.write(&items) {
            Ok(()) => true,
            Err(e) => {
                warn!(id, error = %e, "history delete not persisted");
                false
            }
        }
    }

    // == Update ==
    /// Replaces tags and/or notes on the record with `id`.
    pub fn update(&self, id: &str, update: HistoryUpdate) -> bool {
        self.apply_update(id, update) == UpdateOutcome::Updated
    }

    /// Like `update`, but reports why an edit was not applied.
    pub fn apply_update(&self, id: &str, update: HistoryUpdate) -> UpdateOutcome {
        let mut items = self.load();
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return UpdateOutcome::NotFound;
        };

        update.apply(item);
        if item.serialized_size() > self.limits.max_item_size {
            warn!(id, "history update rejected: record too large");
            return UpdateOutcome::TooLarge;
        }

        match self.write(&items) {
            Ok(()) => UpdateOutcome::Updated,
            Err(e) => {
                warn!(id, error = %e, "history update not persisted");
                UpdateOutcome::NotPersisted
            }
        }
    }

    // == Clear ==
    pub fn clear(&self) {
        match self.storage.remove(&self.storage_key) {
            Ok(()) => info!("history cleared"),
            Err(e) => warn!(error = %e, "history clear failed"),
        }
    }

    // == Stats ==
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            count: self.load().len(),
            own_blob_size: self
                .storage
                .value_size(&self.storage_key)
                .ok()
                .flatten()
                .unwrap_or(0),
            total_adapter_size: self.storage.total_size().unwrap_or(0),
        }
    }

    // == Export / Import ==
    /// The current history as a JSON array.
    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&self.load()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Merges an exported array into the store.
    ///
    /// Imported records go through the same validation, dedup and budgets as
    /// `save`. Returns how many imported records were kept, or None when the
    /// blob is not a JSON array or the write failed.
    pub fn import_json(&self, blob: &str) -> Option<usize> {
        let entries: Vec<Value> = match serde_json::from_str(blob) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "history import rejected: not a JSON array");
                return None;
            }
        };

        let imported: Vec<SavedComparison> = parse_records(entries)
            .into_iter()
            .filter_map(|mut item| {
                item.input_text = item.input_text.trim().to_string();
                let acceptable = !item.input_text.is_empty()
                    && item.serialized_size() <= self.limits.max_item_size;
                acceptable.then_some(item)
            })
            .collect();
        let imported_ids: HashSet<String> = imported.iter().map(|item| item.id.clone()).collect();

        let mut merged = self.load();
        merged.extend(imported);
        let merged = dedupe_newest_first(merged);

        let kept = self.commit(merged)?;
        let count = kept
            .iter()
            .filter(|item| imported_ids.contains(&item.id))
            .count();
        info!(count, "history import complete");
        Some(count)
    }

    // == Internals ==

    /// Prunes to budget and writes, shedding records under quota pressure.
    fn commit(&self, items: Vec<SavedComparison>) -> Option<Vec<SavedComparison>> {
        let mut items = self.limits.prune(items);

        if self.would_overflow(&items) {
            let before = items.len();
            items = self.limits.retain_normal(items);
            info!(
                before,
                after = items.len(),
                "history trimmed ahead of write to stay within storage budget"
            );
        }

        match self.write(&items) {
            Ok(()) => return Some(items),
            Err(StorageError::QuotaExceeded) => {}
            Err(e) => {
                warn!(error = %e, "history write failed");
                return None;
            }
        }

        items = self.limits.retain_aggressive(items);
        warn!(
            remaining = items.len(),
            "storage quota exceeded, retrying history write after pruning"
        );
        match self.write(&items) {
            Ok(()) => Some(items),
            Err(e) => {
                warn!(error = %e, "history write abandoned");
                None
            }
        }
    }

    /// Estimates whether writing `items` pushes adapter usage past the budget.
    fn would_overflow(&self, items: &[SavedComparison]) -> bool {
        let Ok(blob) = serde_json::to_string(items) else {
            return false;
        };
        let own = self
            .storage
            .value_size(&self.storage_key)
            .ok()
            .flatten()
            .unwrap_or(0);
        let others = self
            .storage
            .total_size()
            .map(|total| total.saturating_sub(own))
            .unwrap_or(0);
        others + blob.len() > self.limits.max_total_size
    }

    fn write(&self, items: &[SavedComparison]) -> Result<(), StorageError> {
        let blob = serde_json::to_string(items)?;
        self.storage.set(&self.storage_key, &blob)
    }
}

/// Keeps entries that decode as records with a present, non-null result.
fn parse_records(entries: Vec<Value>) -> Vec<SavedComparison> {
    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<SavedComparison>(entry).ok())
        .filter(SavedComparison::is_well_formed)
        .collect()
}

impl fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStore")
            .field("storage_key", &self.storage_key)
            .field("limits", &self.limits)
            .finish()
    }
}
