//! API Routes
//!
//! Configures the Axum router with all comparison service endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, clear_cache_handler, clear_history_handler, compare_handler,
    delete_history_handler, export_history_handler, get_history_handler, health_handler,
    history_stats_handler, import_history_handler, list_history_handler, update_history_handler,
};
use crate::state::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/compare", post(compare_handler))
        .route(
            "/history",
            get(list_history_handler).delete(clear_history_handler),
        )
        .route("/history/stats", get(history_stats_handler))
        .route("/history/export", get(export_history_handler))
        .route("/history/import", post(import_history_handler))
        .route(
            "/history/:id",
            get(get_history_handler)
                .patch(update_history_handler)
                .delete(delete_history_handler),
        )
        .route("/cache", delete(clear_cache_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
