//! Remote generator that turns a description into per-format renderings.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::GeneratorError;
use crate::models::ComparisonResult;

/// Produces equivalent renderings of the described data in several formats.
///
/// Calls may be slow or fail; callers cache successful results.
#[async_trait]
pub trait FormatGenerator: Send + Sync {
    async fn generate(&self, description: &str) -> Result<ComparisonResult, GeneratorError>;
}

/// Generator reached over HTTP.
///
/// Posts `{"description": ...}` and expects a `ComparisonResult` body.
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGenerator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FormatGenerator for HttpGenerator {
    async fn generate(&self, description: &str) -> Result<ComparisonResult, GeneratorError> {
        debug!(endpoint = %self.endpoint, "requesting format generation");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "description": description }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::Status(status.as_u16()));
        }

        let result: ComparisonResult = response.json().await?;
        if result.is_empty() {
            return Err(GeneratorError::Empty);
        }
        Ok(result)
    }
}
