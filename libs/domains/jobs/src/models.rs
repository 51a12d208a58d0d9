use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Default number of jobs returned by a search
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// Upper bound on the number of jobs a single search may return
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Rejects strings that are empty or whitespace only
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Job posting with its semantic embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: String,
    /// Embedding of `"{title}. {description}. {requirements}"`
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated job together with its embedding, ready to be stored.
///
/// The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub embedding: Vec<f32>,
}

impl NewJob {
    pub fn new(input: CreateJob, embedding: Vec<f32>) -> Self {
        Self {
            title: input.title,
            description: input.description,
            requirements: input.requirements,
            embedding,
        }
    }
}

/// DTO for posting a job
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateJob {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Backend Engineer")]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Build and run the matching service")]
    pub description: String,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Rust, PostgreSQL")]
    pub requirements: String,
}

impl CreateJob {
    /// Text sent to the embedding provider
    pub fn embedding_text(&self) -> String {
        compose_embedding_text(&self.title, &self.description, &self.requirements)
    }
}

/// Response body for a created job
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateJobResponse {
    #[schema(example = "Job created successfully")]
    pub message: String,
    pub id: Uuid,
}

impl CreateJobResponse {
    pub fn created(id: Uuid) -> Self {
        Self {
            message: "Job created successfully".to_string(),
            id,
        }
    }
}

/// Search request: either free text, embedded on the fly, or a raw query vector
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_search_target"))]
pub struct SearchJobs {
    /// Free-text query
    #[schema(example = "senior rust engineer")]
    pub query: Option<String>,
    /// Precomputed query embedding
    pub vector: Option<Vec<f32>>,
    /// Maximum number of results; zero or negative returns nothing
    #[validate(range(max = 100))]
    pub limit: Option<i64>,
}

impl SearchJobs {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(MAX_SEARCH_LIMIT)
    }
}

fn validate_search_target(search: &SearchJobs) -> Result<(), ValidationError> {
    match (&search.query, &search.vector) {
        (Some(query), None) if !query.trim().is_empty() => Ok(()),
        (None, Some(vector)) if !vector.is_empty() => {
            if all_finite(vector) {
                Ok(())
            } else {
                let mut err = ValidationError::new("non_finite");
                err.message = Some("`vector` must contain only finite numbers".into());
                Err(err)
            }
        }
        _ => {
            let mut err = ValidationError::new("search_target");
            err.message = Some("exactly one of `query` or `vector` must be provided".into());
            Err(err)
        }
    }
}

/// Job as returned by the API; the embedding stays server side
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            requirements: job.requirements,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// False when any component is NaN or infinite
pub(crate) fn all_finite(vector: &[f32]) -> bool {
    vector.iter().all(|v| v.is_finite())
}

/// Joins the job fields into the single text that gets embedded
pub fn compose_embedding_text(title: &str, description: &str, requirements: &str) -> String {
    format!("{}. {}. {}", title, description, requirements)
}

/// `1 - cos(a, b)`. A zero-norm vector is treated as orthogonal to everything.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())
}
