//! Jobs Domain
//!
//! Job postings with semantic search: every posted job is embedded through an
//! external provider and stored next to its vector, and searches rank jobs by
//! cosine distance to a query embedding.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌────────────────────┐
//! │   Service   │ ───► │ EmbeddingProvider  │  ← OpenAI-compatible API
//! └──────┬──────┘      └────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← pgvector or in-memory
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::embedding::EmbeddingConfig;
//! use domain_jobs::{InMemoryJobRepository, JobService, OpenAIProvider, handlers};
//!
//! # fn main() -> Result<(), domain_jobs::JobError> {
//! let config = EmbeddingConfig::new("sk-...");
//! let provider = OpenAIProvider::new(&config)?;
//! let repository = InMemoryJobRepository::new(config.dimension);
//! let service = JobService::new(repository, provider);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use embedding::{EmbeddingModel, EmbeddingProvider, EmbeddingProviderType, OpenAIProvider};
pub use error::{JobError, JobResult};
pub use models::{
    CreateJob, CreateJobResponse, Job, JobResponse, NewJob, SearchJobs, compose_embedding_text,
    cosine_distance,
};
pub use postgres::PgJobRepository;
pub use repository::{InMemoryJobRepository, JobRepository};
pub use service::JobService;
