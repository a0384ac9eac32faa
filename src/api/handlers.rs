//! API Handlers
//!
//! HTTP request handlers for the comparison, history and cache endpoints.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::compare::run_comparison;
use crate::error::{AppError, Result};
use crate::history::{HistoryStats, HistoryUpdate, SavedComparison, UpdateOutcome};
use crate::models::{
    CacheStatsResponse, ClearResponse, CompareRequest, CompareResponse, DeleteResponse,
    HealthResponse, HistoryQuery, ImportResponse,
};
use crate::state::AppState;

/// Handler for POST /compare
///
/// Serves from the comparison cache or generates, caches and records a result.
pub async fn compare_handler(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<CompareResponse>> {
    Ok(Json(run_comparison(&state, req).await?))
}

/// Handler for GET /history
///
/// `q` searches input, tags and notes; `tags` keeps records carrying any of
/// the listed tags. Both may be combined.
pub async fn list_history_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<SavedComparison>>> {
    let tags = query.tag_list();
    let q = query.q.unwrap_or_default();
    let items = state
        .with_history(move |history| history.find(&q, &tags))
        .await?;
    Ok(Json(items))
}

/// Handler for GET /history/:id
pub async fn get_history_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SavedComparison>> {
    let lookup = id.clone();
    state
        .with_history(move |history| history.get_by_id(&lookup))
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(id))
}

/// Handler for PATCH /history/:id
///
/// Replaces tags and/or notes and returns the updated record.
pub async fn update_history_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<HistoryUpdate>,
) -> Result<Json<SavedComparison>> {
    let target = id.clone();
    let (outcome, record) = state
        .with_history(move |history| {
            let outcome = history.apply_update(&target, update);
            (outcome, history.get_by_id(&target))
        })
        .await?;

    match outcome {
        UpdateOutcome::Updated => record.map(Json).ok_or(AppError::NotFound(id)),
        UpdateOutcome::NotFound => Err(AppError::NotFound(id)),
        UpdateOutcome::TooLarge => Err(AppError::InvalidRequest(format!(
            "Update to '{}' exceeds the record size limit",
            id
        ))),
        UpdateOutcome::NotPersisted => Err(AppError::Internal(format!(
            "Update to '{}' could not be stored",
            id
        ))),
    }
}

/// Handler for DELETE /history/:id
pub async fn delete_history_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let target = id.clone();
    if state
        .with_history(move |history| history.delete(&target))
        .await?
    {
        Ok(Json(DeleteResponse::new(id)))
    } else {
        Err(AppError::NotFound(id))
    }
}

/// Handler for DELETE /history
pub async fn clear_history_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    state.with_history(|history| history.clear()).await?;
    Ok(Json(ClearResponse::new("History")))
}

/// Handler for GET /history/stats
pub async fn history_stats_handler(State(state): State<AppState>) -> Result<Json<HistoryStats>> {
    Ok(Json(state.with_history(|history| history.stats()).await?))
}

/// Handler for GET /history/export
pub async fn export_history_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let body = state.with_history(|history| history.export_json()).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

/// Handler for POST /history/import
///
/// Accepts an array previously produced by the export endpoint.
pub async fn import_history_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ImportResponse>> {
    if !body.is_array() {
        return Err(AppError::InvalidRequest(
            "Import body must be a JSON array".to_string(),
        ));
    }

    let blob = body.to_string();
    let imported = state
        .with_history(move |history| history.import_json(&blob))
        .await?
        .ok_or_else(|| AppError::Internal("History import could not be stored".to_string()))?;

    Ok(Json(ImportResponse { imported }))
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Result<Json<CacheStatsResponse>> {
    let comparisons = state.with_comparisons(|cache| cache.stats()).await?;
    let token_counts = state.with_token_counts(|cache| cache.stats()).await?;

    Ok(Json(CacheStatsResponse {
        comparisons,
        token_counts,
    }))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    state.with_comparisons(|cache| cache.clear()).await?;
    state.with_token_counts(|cache| cache.clear()).await?;
    Ok(Json(ClearResponse::new("Caches")))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
