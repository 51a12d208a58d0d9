/// Error type for connection management, health checks and schema checks.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// The live schema does not match what the service expects
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
