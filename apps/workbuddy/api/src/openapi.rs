use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "WorkBuddy API",
        version = "0.1.0",
        description = "Job postings with semantic search over OpenAI embeddings stored in pgvector"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = crate::api::JOBS_PATH, api = domain_jobs::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
