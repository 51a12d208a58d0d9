use crate::{ConfigError, FromEnv, env_or_default, env_parse, env_required};
use std::fmt;
use std::time::Duration;

/// Output dimension of `text-embedding-3-small`, used for the `jobs.embedding` column.
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Embedding provider configuration.
///
/// `dimension` is the single source of truth for vector length: the provider
/// requests it, the store validates against it and startup compares it with
/// the live `jobs.embedding` column.
#[derive(Clone)]
pub struct EmbeddingConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub dimension: usize,
    pub timeout_secs: u64,
}

impl EmbeddingConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimension: DEFAULT_EMBEDDING_DIMENSION,
            timeout_secs: 30,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Keep the API key out of logs.
impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("dimension", &self.dimension)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl FromEnv for EmbeddingConfig {
    /// Environment variables:
    /// - `OPENAI_API_KEY` (required)
    /// - `OPENAI_BASE_URL` (default: https://api.openai.com/v1)
    /// - `EMBEDDING_MODEL` (default: text-embedding-3-small)
    /// - `EMBEDDING_DIMENSION` (default: 1536)
    /// - `EMBEDDING_TIMEOUT_SECS` (default: 30)
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("OPENAI_API_KEY")?;
        let base_url = env_or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL);
        let model = env_or_default("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL);
        let dimension: usize =
            env_parse("EMBEDDING_DIMENSION", &DEFAULT_EMBEDDING_DIMENSION.to_string())?;
        let timeout_secs = env_parse("EMBEDDING_TIMEOUT_SECS", "30")?;

        if dimension == 0 {
            return Err(ConfigError::Invalid {
                key: "EMBEDDING_DIMENSION".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            dimension,
            timeout_secs,
        })
    }
}
