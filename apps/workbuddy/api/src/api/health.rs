//! Readiness check against PostgreSQL and the pgvector extension.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use database::postgres::{check_health, extension_version};

/// Readiness check endpoint.
///
/// Uses the generic `run_health_checks` utility from axum-helpers; any failing
/// check turns the response into a 503.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "database",
            Box::pin(async {
                check_health(&state.db)
                    .await
                    .map_err(|e| format!("Database ping failed: {}", e))
            }),
        ),
        (
            "pgvector",
            Box::pin(async {
                match extension_version(&state.db, "vector").await {
                    Ok(Some(_)) => Ok(()),
                    Ok(None) => Err("vector extension is not installed".to_string()),
                    Err(e) => Err(format!("Extension lookup failed: {}", e)),
                }
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
