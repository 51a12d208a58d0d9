use async_trait::async_trait;
use core_config::embedding::EmbeddingConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{EmbeddingModel, EmbeddingProvider, EmbeddingProviderType};
use crate::error::{JobError, JobResult};

/// OpenAI embeddings provider.
///
/// Also talks to any server exposing the OpenAI `/embeddings` API when
/// `base_url` points elsewhere.
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model_name: String,
    model: EmbeddingModel,
    dimension: usize,
}

impl OpenAIProvider {
    pub fn new(config: &EmbeddingConfig) -> JobResult<Self> {
        let model = EmbeddingModel::from_name(&config.model, config.dimension);

        if !model.supports_dimensions() && model.dimension() != config.dimension {
            return Err(JobError::Config(format!(
                "model {} always returns {} dimensions, configured {}",
                config.model,
                model.dimension(),
                config.dimension
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| JobError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_name: config.model.clone(),
            model,
            dimension: config.dimension,
        })
    }

    /// `dimensions` is only sent when it changes what the model would return
    fn requested_dimensions(&self) -> Option<u32> {
        match self.model {
            EmbeddingModel::Custom(dim) => Some(dim),
            model if model.dimension() != self.dimension => Some(self.dimension as u32),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn provider_type(&self) -> EmbeddingProviderType {
        self.model.provider()
    }

    fn model(&self) -> EmbeddingModel {
        self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> JobResult<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.model_name,
            input: [text],
            dimensions: self.requested_dimensions(),
        };

        debug!(model = %self.model_name, chars = text.len(), "Requesting embedding");

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, "Embedding provider returned an error");
            return Err(JobError::EmbeddingGeneration(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response.json().await?;

        let embedding = embedding_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| JobError::EmbeddingGeneration("No embedding returned".to_string()))?;

        // Length is enforced by the store, which rejects mismatches as persistence errors
        if embedding.len() != self.dimension {
            warn!(
                expected = self.dimension,
                actual = embedding.len(),
                "Provider returned an unexpected embedding length"
            );
        }

        Ok(embedding)
    }
}
