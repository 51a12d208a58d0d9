use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{JobError, JobResult};
use crate::models::{Job, NewJob, cosine_distance};

/// Vector record store for jobs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Required length of every stored embedding
    fn dimension(&self) -> usize;

    /// Persist a job; assigns id and timestamps.
    ///
    /// Fails with `Persistence` when the embedding length is wrong.
    async fn create(&self, input: NewJob) -> JobResult<Job>;

    /// Up to `limit` jobs in ascending cosine distance to `query`
    async fn search_by_vector(&self, query: &[f32], limit: i64) -> JobResult<Vec<Job>>;
}

pub(crate) fn check_dimension(expected: usize, embedding: &[f32]) -> JobResult<()> {
    if embedding.len() != expected {
        return Err(JobError::Persistence(format!(
            "expected {} dimensions, not {}",
            expected,
            embedding.len()
        )));
    }
    Ok(())
}

/// In-memory implementation of JobRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryJobRepository {
    dimension: usize,
    jobs: Arc<RwLock<Vec<Job>>>,
}

impl InMemoryJobRepository {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            jobs: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn create(&self, input: NewJob) -> JobResult<Job> {
        check_dimension(self.dimension, &input.embedding)?;

        let now = Utc::now();
        let job = Job {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            requirements: input.requirements,
            embedding: input.embedding,
            created_at: now,
            updated_at: now,
        };

        self.jobs.write().await.push(job.clone());

        tracing::info!(job_id = %job.id, "Created job");
        Ok(job)
    }

    async fn search_by_vector(&self, query: &[f32], limit: i64) -> JobResult<Vec<Job>> {
        if limit <= 0 {
            return Ok(vec![]);
        }
        check_dimension(self.dimension, query)?;

        let jobs = self.jobs.read().await;

        let mut scored: Vec<(f32, &Job)> = jobs
            .iter()
            .map(|job| (cosine_distance(&job.embedding, query), job))
            .collect();

        // Stable sort: insertion order breaks ties
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(scored
            .into_iter()
            .take(limit as usize)
            .map(|(_, job)| job.clone())
            .collect())
    }
}
