//! Compare Module
//!
//! Request flow for one comparison: derive the key, check the cache, call the
//! generator on a miss, count tokens, then cache and record the result.

mod generator;
mod tokenizer;

pub use generator::{FormatGenerator, HttpGenerator};
pub use tokenizer::{ApproxTokenizer, Tokenizer};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::keys::{hash_key, token_count_key};
use crate::models::{CompareRequest, CompareResponse, ComparisonResult};
use crate::state::AppState;

/// Runs one comparison request end to end.
///
/// Only fresh results are saved to history; cache hits return immediately.
pub async fn run_comparison(state: &AppState, request: CompareRequest) -> Result<CompareResponse> {
    if let Some(message) = request.validate() {
        return Err(AppError::InvalidRequest(message));
    }
    let input = request.input.trim().to_string();
    let key = hash_key(&input);

    let lookup = key.clone();
    if let Some(result) = state.with_comparisons(move |cache| cache.get(&lookup)).await? {
        debug!(key = %key, "comparison served from cache");
        return Ok(CompareResponse {
            key,
            cached: true,
            result,
            saved: None,
        });
    }

    // No lock is held across the remote call
    let result = state.generator.generate(&input).await?;
    let result = count_tokens(state, result).await?;

    let (entry_key, entry) = (key.clone(), result.clone());
    state
        .with_comparisons(move |cache| cache.set(&entry_key, entry, None))
        .await?;

    let payload =
        serde_json::to_value(&result).map_err(|e| AppError::Internal(e.to_string()))?;
    let CompareRequest { tags, notes, .. } = request;
    let saved = state
        .with_history(move |history| history.save(&input, payload, tags, notes))
        .await?;
    if saved.is_none() {
        warn!(key = %key, "comparison not recorded in history");
    }

    info!(key = %key, formats = result.formats.len(), "comparison generated");
    Ok(CompareResponse {
        key,
        cached: false,
        result,
        saved,
    })
}

/// Fills `tokens` for every format, reusing cached counts.
async fn count_tokens(state: &AppState, mut result: ComparisonResult) -> Result<ComparisonResult> {
    let tokenizer = Arc::clone(&state.tokenizer);
    state
        .with_token_counts(move |cache| {
            for output in &mut result.formats {
                let key = token_count_key(&output.format, &output.code);
                let tokens = match cache.get(&key) {
                    Some(tokens) => tokens,
                    None => {
                        let tokens = tokenizer.count(&output.code);
                        cache.set(&key, tokens, None);
                        tokens
                    }
                };
                output.tokens = Some(tokens);
            }
            result
        })
        .await
}
