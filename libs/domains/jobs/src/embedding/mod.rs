mod openai;
mod provider;

pub use openai::OpenAIProvider;
pub use provider::{EmbeddingModel, EmbeddingProvider, EmbeddingProviderType};

#[cfg(test)]
pub use provider::MockEmbeddingProvider;
