//! History budgets and pruning.

use super::model::SavedComparison;

// == Public Constants ==
/// Maximum number of saved comparisons
pub const MAX_HISTORY_ITEMS: usize = 50;

/// Maximum serialized size of one record in bytes
pub const MAX_ITEM_SIZE: usize = 100 * 1000;

/// Maximum serialized size of all records in bytes
pub const MAX_TOTAL_SIZE: usize = 4_500 * 1000;

/// Share of records kept when a write is predicted to overflow the budget
pub const NORMAL_RETENTION: f64 = 0.8;

/// Share of records kept after the adapter reported quota exhaustion
pub const AGGRESSIVE_RETENTION: f64 = 0.7;

/// Count and byte budgets for a history store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryLimits {
    pub max_items: usize,
    pub max_item_size: usize,
    pub max_total_size: usize,
    pub normal_retention: f64,
    pub aggressive_retention: f64,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            max_items: MAX_HISTORY_ITEMS,
            max_item_size: MAX_ITEM_SIZE,
            max_total_size: MAX_TOTAL_SIZE,
            normal_retention: NORMAL_RETENTION,
            aggressive_retention: AGGRESSIVE_RETENTION,
        }
    }
}

impl HistoryLimits {
    // == Prune ==
    /// Applies the count and byte budgets to records sorted newest first.
    ///
    /// Oversized records are skipped. Accumulation stops at the first record
    /// that would break either budget; everything older is dropped.
    pub fn prune(&self, items: Vec<SavedComparison>) -> Vec<SavedComparison> {
        let mut kept = Vec::with_capacity(items.len().min(self.max_items));
        let mut total = 0usize;

        for item in items {
            let size = item.serialized_size();
            if size > self.max_item_size {
                continue;
            }
            if kept.len() >= self.max_items || total + size > self.max_total_size {
                break;
            }
            total += size;
            kept.push(item);
        }
        kept
    }

    pub fn retain_normal(&self, items: Vec<SavedComparison>) -> Vec<SavedComparison> {
        retain_ratio(items, self.normal_retention)
    }

    pub fn retain_aggressive(&self, items: Vec<SavedComparison>) -> Vec<SavedComparison> {
        retain_ratio(items, self.aggressive_retention)
    }
}

/// Keeps the newest `floor(len * ratio)` records, never fewer than one.
fn retain_ratio(mut items: Vec<SavedComparison>, ratio: f64) -> Vec<SavedComparison> {
    if items.is_empty() {
        return items;
    }
    let keep = ((items.len() as f64) * ratio).floor() as usize;
    items.truncate(keep.clamp(1, items.len()));
    items
}
