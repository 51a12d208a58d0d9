use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum JobError {
    /// Malformed or incomplete input; nothing was called or stored
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The embedding provider failed or returned nothing usable
    #[error("Embedding generation failed: {0}")]
    EmbeddingGeneration(String),

    /// The store rejected the write or read
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// Reserved for lookups by id
    #[error("Job not found: {0}")]
    NotFound(Uuid),

    /// The operation exceeded its deadline
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Provider, store and schema disagree on the embedding dimension
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type JobResult<T> = Result<T, JobError>;

impl From<sea_orm::DbErr> for JobError {
    fn from(err: sea_orm::DbErr) -> Self {
        JobError::Persistence(err.to_string())
    }
}

impl From<reqwest::Error> for JobError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the URL, it may carry the provider host of a private deployment.
        JobError::EmbeddingGeneration(err.without_url().to_string())
    }
}

impl From<database::DatabaseError> for JobError {
    fn from(err: database::DatabaseError) -> Self {
        match err {
            database::DatabaseError::SchemaMismatch(msg) => JobError::Config(msg),
            other => JobError::Persistence(other.to_string()),
        }
    }
}

/// Convert JobError to AppError for standardized error responses
impl From<JobError> for AppError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::Validation(msg) => AppError::InvalidInput(msg),
            JobError::EmbeddingGeneration(msg) => AppError::Embedding(msg),
            JobError::Persistence(msg) => AppError::Database(msg),
            JobError::NotFound(id) => AppError::NotFound(format!("Job {} not found", id)),
            JobError::Timeout(msg) => AppError::GatewayTimeout(msg),
            JobError::Config(msg) => AppError::InternalServerError(format!("Config error: {}", msg)),
        }
    }
}

impl IntoResponse for JobError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
