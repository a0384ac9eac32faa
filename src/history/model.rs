//! History record types.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Saved Comparison ==
/// One persisted (input, result) pair.
///
/// `createdAt` is also accepted as `timestamp` when reading older blobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedComparison {
    pub id: String,
    /// Creation timestamp (Unix milliseconds)
    #[serde(alias = "timestamp")]
    pub created_at: u64,
    /// Trimmed request text
    pub input_text: String,
    /// Opaque comparison payload
    pub result: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SavedComparison {
    /// UTF-8 length of the record's JSON encoding.
    pub fn serialized_size(&self) -> usize {
        serde_json::to_string(self)
            .map(|json| json.len())
            .unwrap_or(usize::MAX)
    }

    /// Dedup key: trimmed and case-folded input.
    pub fn normalized_input(&self) -> String {
        normalize_input(&self.input_text)
    }

    /// Structural checks serde cannot express.
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.result.is_null()
    }
}

pub fn normalize_input(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Collapses records with equal normalized input, keeping the newest, and
/// returns them newest first.
///
/// On equal timestamps the record that appears first wins and keeps its
/// relative position, so a list that is already newest first round-trips
/// unchanged.
pub(crate) fn dedupe_newest_first(items: Vec<SavedComparison>) -> Vec<SavedComparison> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut deduped: Vec<SavedComparison> = Vec::with_capacity(items.len());
    for item in items {
        let key = item.normalized_input();
        match slots.get(&key) {
            Some(&slot) => {
                if item.created_at > deduped[slot].created_at {
                    deduped[slot] = item;
                }
            }
            None => {
                slots.insert(key, deduped.len());
                deduped.push(item);
            }
        }
    }

    sort_newest_first(&mut deduped);
    deduped
}

/// Stable sort by `createdAt`, newest first.
fn sort_newest_first(items: &mut [SavedComparison]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

// == Update ==
/// Annotation changes accepted by `HistoryStore::update`.
///
/// A field left as None is untouched; an empty value clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoryUpdate {
    #[serde(default)]
    pub tags: Option<BTreeSet<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl HistoryUpdate {
    pub(crate) fn apply(self, item: &mut SavedComparison) {
        if let Some(tags) = self.tags {
            item.tags = if tags.is_empty() { None } else { Some(tags) };
        }
        if let Some(notes) = self.notes {
            item.notes = if notes.trim().is_empty() { None } else { Some(notes) };
        }
    }
}

/// Result of applying a `HistoryUpdate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    /// The edited record would exceed the per-item size budget
    TooLarge,
    /// The edit was valid but the adapter refused the write
    NotPersisted,
}

// == Stats ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    /// Records returned by `load`
    pub count: usize,
    /// Bytes of the history blob itself
    pub own_blob_size: usize,
    /// Bytes across every adapter key
    pub total_adapter_size: usize,
}
