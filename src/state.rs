//! Application state
//!
//! Composition root: builds one adapter, both caches and the history store,
//! and hands them to the HTTP layer and background tasks.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::caches::{ComparisonCache, TokenCountCache};
use crate::clock::{Clock, SystemClock};
use crate::compare::{ApproxTokenizer, FormatGenerator, HttpGenerator, Tokenizer};
use crate::config::Config;
use crate::error::{AppError, Result, StorageError};
use crate::history::HistoryStore;
use crate::storage::{FileStorage, KeyValueStore};

/// Application state shared across all handlers.
///
/// Each store sits behind a Mutex so the read-modify-write cycles of one
/// process never interleave. Store calls may block on file I/O, so handlers
/// reach them through the `with_*` helpers, which run on the blocking pool
/// and never hold a lock across an await.
#[derive(Clone)]
pub struct AppState {
    pub comparisons: Arc<Mutex<ComparisonCache>>,
    pub token_counts: Arc<Mutex<TokenCountCache>>,
    pub history: Arc<Mutex<HistoryStore>>,
    pub generator: Arc<dyn FormatGenerator>,
    pub tokenizer: Arc<dyn Tokenizer>,
}

impl AppState {
    /// Wires every component onto a single adapter and clock.
    pub fn new(
        config: &Config,
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        generator: Arc<dyn FormatGenerator>,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> Self {
        let comparisons =
            ComparisonCache::new(config.comparison_cache(), storage.clone(), clock.clone());
        let token_counts = TokenCountCache::new(config.token_cache(), storage.clone(), clock.clone());
        let history = HistoryStore::with_limits(storage, clock, config.history);

        Self {
            comparisons: Arc::new(Mutex::new(comparisons)),
            token_counts: Arc::new(Mutex::new(token_counts)),
            history: Arc::new(Mutex::new(history)),
            generator,
            tokenizer,
        }
    }

    /// Creates the production state: file adapter, wall clock, HTTP generator.
    pub fn from_config(config: &Config) -> std::result::Result<Self, StorageError> {
        let storage = FileStorage::open(&config.storage_dir, config.storage_quota)?;
        Ok(Self::new(
            config,
            Arc::new(storage),
            Arc::new(SystemClock),
            Arc::new(HttpGenerator::new(config.generator_url.clone())),
            Arc::new(ApproxTokenizer),
        ))
    }

    // == Blocking Access ==
    pub async fn with_comparisons<R, F>(&self, op: F) -> Result<R>
    where
        F: FnOnce(&mut ComparisonCache) -> R + Send + 'static,
        R: Send + 'static,
    {
        run_blocking(&self.comparisons, op).await
    }

    pub async fn with_token_counts<R, F>(&self, op: F) -> Result<R>
    where
        F: FnOnce(&mut TokenCountCache) -> R + Send + 'static,
        R: Send + 'static,
    {
        run_blocking(&self.token_counts, op).await
    }

    pub async fn with_history<R, F>(&self, op: F) -> Result<R>
    where
        F: FnOnce(&HistoryStore) -> R + Send + 'static,
        R: Send + 'static,
    {
        run_blocking(&self.history, move |history| op(history)).await
    }
}

/// Locks `store` on the blocking pool and runs `op` against it.
async fn run_blocking<S, R, F>(store: &Arc<Mutex<S>>, op: F) -> Result<R>
where
    S: Send + 'static,
    F: FnOnce(&mut S) -> R + Send + 'static,
    R: Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || op(&mut store.lock()))
        .await
        .map_err(|e| AppError::Internal(format!("storage task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::compare::ApproxTokenizer;
    use crate::error::GeneratorError;
    use crate::models::ComparisonResult;
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;
    use serde_json::json;

    struct NoGenerator;

    #[async_trait]
    impl FormatGenerator for NoGenerator {
        async fn generate(
            &self,
            _: &str,
        ) -> std::result::Result<ComparisonResult, GeneratorError> {
            Err(GeneratorError::Empty)
        }
    }

    #[tokio::test]
    async fn test_with_helpers_share_one_adapter() {
        let storage = Arc::new(MemoryStorage::new());
        let state = AppState::new(
            &Config::default(),
            storage.clone(),
            Arc::new(ManualClock::new(0)),
            Arc::new(NoGenerator),
            Arc::new(ApproxTokenizer),
        );

        state
            .with_token_counts(|cache| cache.set("json:1", 4, None))
            .await
            .unwrap();
        let saved = state
            .with_history(|history| history.save("rows", json!(1), None, None))
            .await
            .unwrap();

        assert!(saved.is_some());
        assert_eq!(state.with_token_counts(|cache| cache.get("json:1")).await.unwrap(), Some(4));
        assert_eq!(state.with_comparisons(|cache| cache.len()).await.unwrap(), 0);
        assert!(storage.keys().unwrap().len() >= 2);
    }

    #[tokio::test]
    async fn test_from_config_uses_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            storage_dir: dir.path().join("store"),
            ..Config::default()
        };

        let state = AppState::from_config(&config).unwrap();
        state
            .with_history(|history| history.save("persisted", json!(1), None, None))
            .await
            .unwrap();

        let reopened = AppState::from_config(&config).unwrap();
        let items = reopened.with_history(|history| history.load()).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].input_text, "persisted");
    }
}
