use async_trait::async_trait;
use database::postgres::vector_column_dimension;
use sea_orm::prelude::PgVector;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseConnection, EntityTrait, Order, QueryOrder, QuerySelect};

use crate::{
    entity,
    error::{JobError, JobResult},
    models::{Job, NewJob},
    repository::{JobRepository, check_dimension},
};

/// pgvector-backed job store
#[derive(Clone)]
pub struct PgJobRepository {
    db: DatabaseConnection,
    dimension: usize,
}

impl PgJobRepository {
    pub fn new(db: DatabaseConnection, dimension: usize) -> Self {
        Self { db, dimension }
    }

    /// Fails with `Config` when `jobs.embedding` is declared with another dimension
    pub async fn verify_dimension(&self) -> JobResult<()> {
        let declared = vector_column_dimension(&self.db, "jobs", "embedding").await?;

        match declared {
            Some(dim) if dim == self.dimension => {
                tracing::debug!(dimension = dim, "jobs.embedding dimension verified");
                Ok(())
            }
            Some(dim) => Err(JobError::Config(format!(
                "jobs.embedding is vector({}), service is configured for {}",
                dim, self.dimension
            ))),
            None => Err(JobError::Config(
                "jobs.embedding has no declared dimension".to_string(),
            )),
        }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn create(&self, input: NewJob) -> JobResult<Job> {
        check_dimension(self.dimension, &input.embedding)?;

        let active_model: entity::ActiveModel = input.into();

        let model = entity::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| JobError::Persistence(format!("Database error: {}", e)))?;

        tracing::info!(job_id = %model.id, "Created job");
        Ok(model.into())
    }

    async fn search_by_vector(&self, query: &[f32], limit: i64) -> JobResult<Vec<Job>> {
        if limit <= 0 {
            return Ok(vec![]);
        }
        check_dimension(self.dimension, query)?;

        let distance = Expr::cust_with_values("embedding <=> ?", [PgVector::from(query.to_vec())]);

        let models = entity::Entity::find()
            .order_by(distance, Order::Asc)
            // v7 ids are time ordered, so ties keep insertion order
            .order_by_asc(entity::Column::Id)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(|e| JobError::Persistence(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(Job::from).collect())
    }
}
