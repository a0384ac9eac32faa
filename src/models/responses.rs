//! Response DTOs for the comparison API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::history::SavedComparison;
use crate::models::ComparisonResult;

/// Response body for POST /compare
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    /// Cache key derived from the input
    pub key: String,
    /// True when served from the comparison cache
    pub cached: bool,
    pub result: ComparisonResult,
    /// History record written for a fresh result, if the save succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<SavedComparison>,
}

/// Response body for DELETE /history/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: String,
}

impl DeleteResponse {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Comparison '{}' deleted successfully", id),
            id,
        }
    }
}

/// Response body for DELETE /history and DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn new(what: &str) -> Self {
        Self {
            message: format!("{} cleared", what),
        }
    }
}

/// Response body for POST /history/import
#[derive(Debug, Clone, Serialize)]
pub struct ImportResponse {
    /// Imported records that survived dedup and budgets
    pub imported: usize,
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub comparisons: CacheStats,
    pub token_counts: CacheStats,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new("abc");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("abc"));
        assert!(json.contains("deleted"));
    }

    #[test]
    fn test_compare_response_omits_missing_record() {
        let resp = CompareResponse {
            key: "2p".to_string(),
            cached: true,
            result: ComparisonResult::default(),
            saved: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["cached"], true);
        assert!(json.get("saved").is_none());
    }

    #[test]
    fn test_cache_stats_response_field_names() {
        let resp = CacheStatsResponse {
            comparisons: CacheStats::default(),
            token_counts: CacheStats::default(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("tokenCounts").is_some());
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
