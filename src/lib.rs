//! Compare Cache - storage layer for token-cost format comparisons
//!
//! Persists comparison results and token counts in TTL caches, keeps a
//! deduplicated, size-bounded history of past comparisons, and serves both
//! over a small REST API.

pub mod api;
pub mod cache;
pub mod caches;
pub mod clock;
pub mod compare;
pub mod config;
pub mod error;
pub mod history;
pub mod keys;
pub mod models;
pub mod state;
pub mod storage;
pub mod tasks;

pub use config::Config;
pub use state::AppState;
pub use tasks::spawn_cleanup_task;
