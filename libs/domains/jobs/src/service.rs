use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::embedding::EmbeddingProvider;
use crate::error::{JobError, JobResult};
use crate::models::{CreateJob, Job, NewJob, all_finite};
use crate::repository::JobRepository;

/// Deadline for the provider call of a create, and for a whole search
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Job matching service: embeds job text and stores or searches it
pub struct JobService<R: JobRepository, E: EmbeddingProvider> {
    repository: Arc<R>,
    embedder: Arc<E>,
    request_timeout: Duration,
}

// Manual impl: derive would require `R: Clone` and `E: Clone`.
impl<R: JobRepository, E: EmbeddingProvider> Clone for JobService<R, E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            embedder: Arc::clone(&self.embedder),
            request_timeout: self.request_timeout,
        }
    }
}

impl<R: JobRepository, E: EmbeddingProvider> JobService<R, E> {
    pub fn new(repository: R, embedder: E) -> Self {
        Self {
            repository: Arc::new(repository),
            embedder: Arc::new(embedder),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Embedding dimension shared by provider and store
    pub fn dimension(&self) -> usize {
        self.repository.dimension()
    }

    /// Fails with `Config` unless provider and store agree on the dimension
    pub fn ensure_dimensions_match(&self) -> JobResult<()> {
        let provider = self.embedder.dimension();
        let store = self.repository.dimension();
        if provider != store {
            error!(provider, store, "Embedding dimension mismatch");
            return Err(JobError::Config(format!(
                "embedding provider produces {} dimensions, store expects {}",
                provider, store
            )));
        }
        Ok(())
    }

    /// Validate, embed and persist a job.
    ///
    /// Embedding failures abort before anything is written. The deadline
    /// covers the provider call only: an insert that has started runs to
    /// completion, so a timeout never leaves a stored row behind.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_job(&self, input: CreateJob) -> JobResult<Job> {
        input
            .validate()
            .map_err(|e| JobError::Validation(e.to_string()))?;

        let started = Instant::now();
        let text = input.embedding_text();

        let embedding = self
            .with_deadline("create job", self.embedder.embed(&text))
            .await
            .map_err(|e| {
                warn!(error = %e, "Embedding generation failed");
                e
            })?;

        if started.elapsed() >= self.request_timeout {
            return Err(self.deadline_exceeded("create job"));
        }

        let job = self
            .repository
            .create(NewJob::new(input, embedding))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to persist job");
                e
            })?;

        info!(job_id = %job.id, "Job created");
        Ok(job)
    }

    /// Jobs nearest to `query`, closest first.
    ///
    /// `limit <= 0` returns nothing without touching the store.
    #[instrument(skip(self, query), fields(dimension = query.len()))]
    pub async fn search_jobs(&self, query: &[f32], limit: i64) -> JobResult<Vec<Job>> {
        if limit <= 0 {
            return Ok(vec![]);
        }
        let expected = self.repository.dimension();
        if query.len() != expected {
            return Err(JobError::Validation(format!(
                "query vector must have {} dimensions, got {}",
                expected,
                query.len()
            )));
        }
        if !all_finite(query) {
            return Err(JobError::Validation(
                "query vector must contain only finite numbers".to_string(),
            ));
        }

        self.with_deadline("search jobs", self.nearest(query, limit)).await
    }

    /// Embed `query` and search with the result.
    #[instrument(skip(self, query))]
    pub async fn search_jobs_by_text(&self, query: &str, limit: i64) -> JobResult<Vec<Job>> {
        if limit <= 0 {
            return Ok(vec![]);
        }
        if query.trim().is_empty() {
            return Err(JobError::Validation("query must not be blank".to_string()));
        }

        self.with_deadline("search jobs", async {
            let embedding = self.embedder.embed(query).await?;
            self.nearest(&embedding, limit).await
        })
        .await
    }

    async fn nearest(&self, query: &[f32], limit: i64) -> JobResult<Vec<Job>> {
        let jobs = self.repository.search_by_vector(query, limit).await?;
        info!(count = jobs.len(), "Search completed");
        Ok(jobs)
    }

    async fn with_deadline<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = JobResult<T>>,
    ) -> JobResult<T> {
        match tokio::time::timeout(self.request_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(self.deadline_exceeded(operation)),
        }
    }

    fn deadline_exceeded(&self, operation: &str) -> JobError {
        warn!(operation, timeout = ?self.request_timeout, "Deadline exceeded");
        JobError::Timeout(format!("{} exceeded {:?}", operation, self.request_timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{EmbeddingModel, EmbeddingProviderType, MockEmbeddingProvider};
    use crate::repository::{InMemoryJobRepository, MockJobRepository};
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    const DIM: usize = 4;

    fn input() -> CreateJob {
        CreateJob {
            title: "Backend Engineer".to_string(),
            description: "Build APIs".to_string(),
            requirements: "Go, SQL".to_string(),
        }
    }

    fn job_from(input: NewJob) -> Job {
        let now = Utc::now();
        Job {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            requirements: input.requirements,
            embedding: input.embedding,
            created_at: now,
            updated_at: now,
        }
    }

    fn embedder_returning(embedding: Vec<f32>) -> MockEmbeddingProvider {
        let mut embedder = MockEmbeddingProvider::new();
        embedder.expect_dimension().return_const(DIM);
        embedder
            .expect_embed()
            .returning(move |_| Ok(embedding.clone()));
        embedder
    }

    /// Provider that never answers
    struct HangingProvider;

    #[async_trait]
    impl EmbeddingProvider for HangingProvider {
        fn provider_type(&self) -> EmbeddingProviderType {
            EmbeddingProviderType::OpenAI
        }

        fn model(&self) -> EmbeddingModel {
            EmbeddingModel::Custom(DIM as u32)
        }

        fn dimension(&self) -> usize {
            DIM
        }

        async fn embed(&self, _text: &str) -> JobResult<Vec<f32>> {
            std::future::pending().await
        }
    }

    /// In-memory store whose writes land immediately but whose replies lag
    struct SlowRepository {
        inner: InMemoryJobRepository,
        delay: Duration,
    }

    #[async_trait]
    impl JobRepository for SlowRepository {
        fn dimension(&self) -> usize {
            self.inner.dimension()
        }

        async fn create(&self, input: NewJob) -> JobResult<Job> {
            let job = self.inner.create(input).await;
            tokio::time::sleep(self.delay).await;
            job
        }

        async fn search_by_vector(&self, query: &[f32], limit: i64) -> JobResult<Vec<Job>> {
            tokio::time::sleep(self.delay).await;
            self.inner.search_by_vector(query, limit).await
        }
    }

    fn slow_repository(delay: Duration) -> (SlowRepository, InMemoryJobRepository) {
        let inner = InMemoryJobRepository::new(DIM);
        let repo = SlowRepository {
            inner: inner.clone(),
            delay,
        };
        (repo, inner)
    }

    #[tokio::test]
    async fn test_create_job_embeds_composed_text() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed()
            .withf(|text| text == "Backend Engineer. Build APIs. Go, SQL")
            .times(1)
            .returning(|_| Ok(vec![0.1; DIM]));

        let mut repo = MockJobRepository::new();
        repo.expect_create()
            .times(1)
            .withf(|job| job.title == "Backend Engineer" && job.embedding.len() == DIM)
            .returning(|job| Ok(job_from(job)));

        let service = JobService::new(repo, embedder);
        let job = service.create_job(input()).await.unwrap();

        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(job.embedding, vec![0.1; DIM]);
    }

    #[tokio::test]
    async fn test_create_job_persists_exactly_one_record() {
        let repo = InMemoryJobRepository::new(DIM);
        let service = JobService::new(repo.clone(), embedder_returning(vec![0.5; DIM]));

        let job = service.create_job(input()).await.unwrap();

        assert_eq!(repo.len().await, 1);
        assert_eq!(job.embedding.len(), DIM);
    }

    #[tokio::test]
    async fn test_embedding_failure_never_touches_store() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed()
            .times(1)
            .returning(|_| Err(JobError::EmbeddingGeneration("quota exceeded".into())));

        let mut repo = MockJobRepository::new();
        repo.expect_create().never();

        let service = JobService::new(repo, embedder);
        let result = service.create_job(input()).await;

        assert!(matches!(result, Err(JobError::EmbeddingGeneration(_))));
    }

    #[tokio::test]
    async fn test_wrong_dimension_surfaces_persistence_error() {
        let repo = InMemoryJobRepository::new(DIM);
        let service = JobService::new(repo.clone(), embedder_returning(vec![0.5; DIM + 1]));

        let result = service.create_job(input()).await;

        assert!(matches!(result, Err(JobError::Persistence(_))));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_blank_field_is_rejected_before_embedding() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder.expect_embed().never();
        let mut repo = MockJobRepository::new();
        repo.expect_create().never();

        let service = JobService::new(repo, embedder);
        let result = service
            .create_job(CreateJob {
                requirements: "   ".to_string(),
                ..input()
            })
            .await;

        assert!(matches!(result, Err(JobError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_times_out_on_hung_provider() {
        let mut repo = MockJobRepository::new();
        repo.expect_create().never();

        let service =
            JobService::new(repo, HangingProvider).with_request_timeout(Duration::from_millis(50));
        let result = service.create_job(input()).await;

        assert!(matches!(result, Err(JobError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_slow_store_ack_is_not_reported_as_timeout() {
        let (repo, stored) = slow_repository(Duration::from_millis(200));
        let service = JobService::new(repo, embedder_returning(vec![0.5; DIM]))
            .with_request_timeout(Duration::from_millis(50));

        let result = service.create_job(input()).await;

        // The row is committed, so the caller must hear about it
        assert!(result.is_ok());
        assert_eq!(stored.len().await, 1);
    }

    #[tokio::test]
    async fn test_search_by_vector_times_out_on_slow_store() {
        let (repo, _) = slow_repository(Duration::from_millis(200));
        let service = JobService::new(repo, MockEmbeddingProvider::new())
            .with_request_timeout(Duration::from_millis(50));

        let result = service.search_jobs(&[1.0, 0.0, 0.0, 0.0], 5).await;

        assert!(matches!(result, Err(JobError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_non_finite_query() {
        let mut repo = MockJobRepository::new();
        repo.expect_dimension().return_const(DIM);
        repo.expect_search_by_vector().never();

        let service = JobService::new(repo, MockEmbeddingProvider::new());

        let infinite = service.search_jobs(&[f32::INFINITY, 0.0, 0.0, 0.0], 5).await;
        assert!(matches!(infinite, Err(JobError::Validation(_))));

        let nan = service.search_jobs(&[0.0, f32::NAN, 0.0, 0.0], 5).await;
        assert!(matches!(nan, Err(JobError::Validation(_))));
    }

    #[tokio::test]
    async fn test_text_search_with_wrong_length_embedding_is_persistence_error() {
        let repo = InMemoryJobRepository::new(DIM);
        let service = JobService::new(repo, embedder_returning(vec![0.5; DIM + 1]));

        let result = service.search_jobs_by_text("rust", 5).await;

        assert!(matches!(result, Err(JobError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_search_with_zero_limit_is_empty() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder.expect_embed().never();
        let mut repo = MockJobRepository::new();
        repo.expect_search_by_vector().never();

        let service = JobService::new(repo, embedder);

        assert!(service.search_jobs(&[0.1; DIM], 0).await.unwrap().is_empty());
        assert!(service.search_jobs_by_text("rust", 0).await.unwrap().is_empty());
        assert!(service.search_jobs_by_text("rust", -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_rejects_wrong_length_query() {
        let mut repo = MockJobRepository::new();
        repo.expect_dimension().return_const(DIM);
        repo.expect_search_by_vector().never();

        let service = JobService::new(repo, MockEmbeddingProvider::new());
        let result = service.search_jobs(&[0.1; DIM - 1], 5).await;

        assert!(matches!(result, Err(JobError::Validation(_))));
    }

    #[tokio::test]
    async fn test_search_returns_nearest_first() {
        let repo = InMemoryJobRepository::new(DIM);
        let vectors = vec![
            ("far", vec![-1.0, 0.0, 0.0, 0.0]),
            ("near", vec![1.0, 0.1, 0.0, 0.0]),
            ("mid", vec![0.0, 1.0, 0.0, 0.0]),
        ];
        for (title, embedding) in vectors {
            repo.create(NewJob {
                title: title.to_string(),
                description: "d".to_string(),
                requirements: "r".to_string(),
                embedding,
            })
            .await
            .unwrap();
        }

        let service = JobService::new(repo, MockEmbeddingProvider::new());
        let jobs = service.search_jobs(&[1.0, 0.0, 0.0, 0.0], 10).await.unwrap();
        let titles: Vec<_> = jobs.iter().map(|j| j.title.as_str()).collect();

        assert_eq!(titles, vec!["near", "mid", "far"]);
    }

    #[tokio::test]
    async fn test_search_by_text_embeds_query() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder
            .expect_embed()
            .withf(|text| text == "rust engineer")
            .times(1)
            .returning(|_| Ok(vec![1.0, 0.0, 0.0, 0.0]));

        let mut repo = MockJobRepository::new();
        repo.expect_dimension().return_const(DIM);
        repo.expect_search_by_vector()
            .withf(|query, limit| query == [1.0f32, 0.0, 0.0, 0.0] && *limit == 3)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = JobService::new(repo, embedder);
        let jobs = service.search_jobs_by_text("rust engineer", 3).await.unwrap();

        assert!(jobs.is_empty());
    }

    #[test]
    fn test_dimension_mismatch_is_config_error() {
        let mut embedder = MockEmbeddingProvider::new();
        embedder.expect_dimension().return_const(1536usize);
        let mut repo = MockJobRepository::new();
        repo.expect_dimension().return_const(768usize);

        let service = JobService::new(repo, embedder);

        assert!(matches!(
            service.ensure_dimensions_match(),
            Err(JobError::Config(_))
        ));
    }

    #[test]
    fn test_matching_dimensions_pass() {
        let repo = InMemoryJobRepository::new(DIM);
        let service = JobService::new(repo, embedder_returning(vec![]));

        assert!(service.ensure_dimensions_match().is_ok());
        assert_eq!(service.dimension(), DIM);
    }
}
