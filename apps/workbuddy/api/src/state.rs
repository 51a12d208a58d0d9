//! Application state management.
//!
//! This module defines the shared application state passed to all request handlers.
//! The state contains:
//! - Configuration
//! - The PostgreSQL connection pool
//! - The job matching service

use domain_jobs::{JobService, OpenAIProvider, PgJobRepository};

/// Job service as wired in production
pub type Jobs = JobService<PgJobRepository, OpenAIProvider>;

/// Shared application state.
///
/// Cloning is cheap: the pool and the service only hold `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    pub jobs: Jobs,
}
