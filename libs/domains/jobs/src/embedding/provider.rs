use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::JobResult;

/// Supported embedding backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmbeddingProviderType {
    #[default]
    OpenAI,
    /// Anything reachable through an OpenAI-compatible endpoint
    Compatible,
}

/// Embedding model selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmbeddingModel {
    /// OpenAI text-embedding-3-small (1536 dimensions)
    #[default]
    TextEmbedding3Small,
    /// OpenAI text-embedding-3-large (3072 dimensions)
    TextEmbedding3Large,
    /// OpenAI text-embedding-ada-002 (1536 dimensions, legacy)
    TextEmbeddingAda002,
    /// Unknown model with a caller-declared dimension
    Custom(u32),
}

impl EmbeddingModel {
    /// Resolves a model name; unknown names become `Custom(dimension)`.
    pub fn from_name(name: &str, dimension: usize) -> Self {
        match name {
            "text-embedding-3-small" => EmbeddingModel::TextEmbedding3Small,
            "text-embedding-3-large" => EmbeddingModel::TextEmbedding3Large,
            "text-embedding-ada-002" => EmbeddingModel::TextEmbeddingAda002,
            _ => EmbeddingModel::Custom(dimension as u32),
        }
    }

    /// Native output dimension of the model
    pub fn dimension(&self) -> usize {
        match self {
            EmbeddingModel::TextEmbedding3Small => 1536,
            EmbeddingModel::TextEmbedding3Large => 3072,
            EmbeddingModel::TextEmbeddingAda002 => 1536,
            EmbeddingModel::Custom(dim) => *dim as usize,
        }
    }

    /// Whether the API accepts a `dimensions` override for this model
    pub fn supports_dimensions(&self) -> bool {
        !matches!(self, EmbeddingModel::TextEmbeddingAda002)
    }

    pub fn provider(&self) -> EmbeddingProviderType {
        match self {
            EmbeddingModel::Custom(_) => EmbeddingProviderType::Compatible,
            _ => EmbeddingProviderType::OpenAI,
        }
    }
}

/// Turns text into a fixed-length vector.
///
/// One call per invocation. Implementations do not retry or cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn provider_type(&self) -> EmbeddingProviderType;

    /// The pinned model
    fn model(&self) -> EmbeddingModel;

    /// Length of every vector returned by `embed`
    fn dimension(&self) -> usize;

    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> JobResult<Vec<f32>>;
}
