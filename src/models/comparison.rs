//! Comparison payload produced by the remote generator.

use serde::{Deserialize, Serialize};

/// One equivalent rendering of the requested data in a single format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOutput {
    /// Format name, e.g. "json" or "yaml"
    pub format: String,
    /// The data rendered in that format
    pub code: String,
    /// Token count, filled in after generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u64>,
}

impl FormatOutput {
    pub fn new(format: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            code: code.into(),
            tokens: None,
        }
    }
}

/// Full result of one comparison request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub formats: Vec<FormatOutput>,
}

impl ComparisonResult {
    pub fn new(formats: Vec<FormatOutput>) -> Self {
        Self { formats }
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}
