use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, GatewayTimeoutResponse, InternalServerErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::embedding::EmbeddingProvider;
use crate::error::{JobError, JobResult};
use crate::models::{CreateJob, CreateJobResponse, JobResponse, SearchJobs};
use crate::repository::JobRepository;
use crate::service::JobService;

const TAG: &str = "jobs";

/// OpenAPI documentation for the Jobs API
#[derive(OpenApi)]
#[openapi(
    paths(create_job, search_jobs),
    components(
        schemas(CreateJob, CreateJobResponse, SearchJobs, JobResponse),
        responses(
            BadRequestValidationResponse,
            InternalServerErrorResponse,
            GatewayTimeoutResponse
        )
    ),
    tags(
        (name = TAG, description = "Job posting and semantic search")
    )
)]
pub struct ApiDoc;

/// Create the jobs router with all HTTP endpoints
pub fn router<R, E>(service: JobService<R, E>) -> Router
where
    R: JobRepository + 'static,
    E: EmbeddingProvider + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_job))
        .route("/search", post(search_jobs))
        .with_state(shared_service)
}

/// Post a job; its text is embedded and stored for matching
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateJob,
    responses(
        (status = 201, description = "Job created successfully", body = CreateJobResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 504, response = GatewayTimeoutResponse)
    )
)]
async fn create_job<R: JobRepository, E: EmbeddingProvider>(
    State(service): State<Arc<JobService<R, E>>>,
    ValidatedJson(input): ValidatedJson<CreateJob>,
) -> JobResult<impl IntoResponse> {
    let job = service.create_job(input).await?;
    Ok((StatusCode::CREATED, Json(CreateJobResponse::created(job.id))))
}

/// Find jobs closest to a text query or a query vector
#[utoipa::path(
    post,
    path = "/search",
    tag = TAG,
    request_body = SearchJobs,
    responses(
        (status = 200, description = "Jobs ordered by similarity, closest first", body = Vec<JobResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 504, response = GatewayTimeoutResponse)
    )
)]
async fn search_jobs<R: JobRepository, E: EmbeddingProvider>(
    State(service): State<Arc<JobService<R, E>>>,
    ValidatedJson(search): ValidatedJson<SearchJobs>,
) -> JobResult<Json<Vec<JobResponse>>> {
    let limit = search.limit();
    let jobs = match (search.query, search.vector) {
        (Some(query), None) => service.search_jobs_by_text(&query, limit).await?,
        (None, Some(vector)) => service.search_jobs(&vector, limit).await?,
        // Ruled out by SearchJobs validation
        _ => {
            return Err(JobError::Validation(
                "exactly one of `query` or `vector` must be provided".to_string(),
            ));
        }
    };

    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}
