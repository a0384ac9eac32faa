//! Request DTOs for the comparison API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use std::collections::BTreeSet;

use serde::Deserialize;

/// Request body for POST /compare
///
/// # Fields
/// - `input`: Natural-language description of the data to compare
/// - `tags`: Optional tags stored with the history record
/// - `notes`: Optional notes stored with the history record
#[derive(Debug, Clone, Deserialize)]
pub struct CompareRequest {
    pub input: String,
    #[serde(default)]
    pub tags: Option<BTreeSet<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CompareRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.input.trim().is_empty() {
            return Some("Input cannot be empty".to_string());
        }
        None
    }
}

/// Query string for GET /history
///
/// `q` is a free-text search; `tags` is a comma-separated tag list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

impl HistoryQuery {
    /// Parsed, non-empty tags.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}
