use axum::Router;
use domain_jobs::handlers;

pub fn router(state: &crate::state::AppState) -> Router {
    handlers::router(state.jobs.clone())
}
