//! API Module
//!
//! HTTP handlers and routing for the comparison REST API.
//!
//! # Endpoints
//! - `POST /compare` - Run (or serve from cache) a format comparison
//! - `GET /history` - List, search (`q`) or filter (`tags`) saved comparisons
//! - `GET|PATCH|DELETE /history/:id` - Read, retag/annotate or delete one record
//! - `DELETE /history` - Clear history
//! - `GET /history/stats` - History size figures
//! - `GET /history/export` / `POST /history/import` - JSON backup
//! - `GET /cache/stats` / `DELETE /cache` - Inspect or clear both caches
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
