use axum_helpers::server::{close_postgres, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, extension_version, run_migrations};
use domain_jobs::{EmbeddingProvider, JobService, OpenAIProvider, PgJobRepository};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Graceful shutdown budget for draining requests and closing the pool
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    run_migrations::<migration::Migrator>(&db, config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    match extension_version(&db, "vector").await? {
        Some(version) => info!(%version, "pgvector extension available"),
        None => eyre::bail!("pgvector extension is not installed"),
    }

    // Provider, store and live column must agree on the embedding dimension
    let provider = OpenAIProvider::new(&config.embedding)?;
    info!(
        model = %config.embedding.model,
        dimension = provider.dimension(),
        "Embedding provider configured"
    );

    let repository = PgJobRepository::new(db.clone(), config.embedding.dimension);
    repository.verify_dimension().await?;

    let jobs = JobService::new(repository, provider).with_request_timeout(config.request_timeout);
    jobs.ensure_dimensions_match()?;

    let state = AppState { config, db, jobs };

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.server)?;

    // Merge health endpoints into the app
    // - /health: liveness check with app name/version
    // - /ready: readiness check against PostgreSQL and pgvector
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(
        "Starting workbuddy API with graceful shutdown ({:?} timeout)",
        SHUTDOWN_TIMEOUT
    );

    let server_config = state.config.server.clone();
    let db = state.db.clone();

    create_production_app(app, &server_config, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing database connections");
        close_postgres(db, "main").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Workbuddy API shutdown complete");
    Ok(())
}
