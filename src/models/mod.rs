//! Domain payloads and API DTOs
//!
//! This module defines the comparison payload cached and saved by the
//! storage layer, plus the request/response bodies of the HTTP surface.

pub mod comparison;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use comparison::{ComparisonResult, FormatOutput};
pub use requests::{CompareRequest, HistoryQuery};
pub use responses::{
    CacheStatsResponse, ClearResponse, CompareResponse, DeleteResponse, HealthResponse,
    ImportResponse,
};
