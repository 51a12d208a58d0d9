//! Handler tests for the Jobs domain
//!
//! These tests drive the jobs router directly with `oneshot`:
//! - Request deserialization and validation
//! - Status codes and response bodies
//! - Error responses and the no-partial-write guarantee
//!
//! The store is in memory and the embedding provider is a local stub, so no
//! container or network is needed.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use domain_jobs::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

const DIM: usize = 8;

/// What the stub provider does on every call
#[derive(Clone)]
enum Reply {
    /// Embed by text length so different texts land on different axes
    Embed,
    Fail,
    WrongLength,
}

#[derive(Clone)]
struct StubEmbedder {
    reply: Reply,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubEmbedder {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    fn provider_type(&self) -> EmbeddingProviderType {
        EmbeddingProviderType::Compatible
    }

    fn model(&self) -> EmbeddingModel {
        EmbeddingModel::Custom(DIM as u32)
    }

    fn dimension(&self) -> usize {
        DIM
    }

    async fn embed(&self, text: &str) -> JobResult<Vec<f32>> {
        self.calls.lock().unwrap().push(text.to_string());
        match self.reply {
            Reply::Embed => Ok(TestDataBuilder::unit_vector(DIM, text.len())),
            Reply::Fail => Err(JobError::EmbeddingGeneration(
                "OpenAI API error (429 Too Many Requests): quota exceeded".to_string(),
            )),
            Reply::WrongLength => Ok(vec![0.5; DIM + 1]),
        }
    }
}

fn app(reply: Reply) -> (Router, InMemoryJobRepository, StubEmbedder) {
    let repo = InMemoryJobRepository::new(DIM);
    let embedder = StubEmbedder::new(reply);
    let service = JobService::new(repo.clone(), embedder.clone());
    (handlers::router(service), repo, embedder)
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    post(uri, serde_json::to_string(&body).unwrap())
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn job_payload() -> Value {
    json!({
        "title": "Backend Engineer",
        "description": "Build APIs",
        "requirements": "Go, SQL"
    })
}

#[tokio::test]
async fn test_create_job_returns_201() {
    let (app, repo, embedder) = app(Reply::Embed);

    let response = app.oneshot(post_json("/", job_payload())).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Job created successfully");
    assert!(body["id"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());

    assert_eq!(embedder.calls(), vec!["Backend Engineer. Build APIs. Go, SQL"]);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_create_job_malformed_json_is_400() {
    let (app, repo, embedder) = app(Reply::Embed);

    let response = app.oneshot(post("/", r#"{"title": "Dev""#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(embedder.calls().is_empty());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_create_job_missing_field_is_400() {
    let (app, repo, _) = app(Reply::Embed);

    let response = app
        .oneshot(post_json("/", json!({ "title": "Dev", "description": "Ship" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_create_job_blank_field_is_400_with_details() {
    let (app, repo, embedder) = app(Reply::Embed);

    let response = app
        .oneshot(post_json(
            "/",
            json!({ "title": "  ", "description": "Ship", "requirements": "Rust" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
    assert!(error.details.unwrap()["title"].is_array());
    assert!(embedder.calls().is_empty());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_create_job_embedding_failure_is_500_and_stores_nothing() {
    let (app, repo, embedder) = app(Reply::Fail);

    let response = app.oneshot(post_json("/", job_payload())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "EMBEDDING_FAILED");
    // Provider details stay in the logs
    assert!(!error.message.contains("quota"));

    assert_eq!(embedder.calls().len(), 1);
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_create_job_dimension_mismatch_is_500() {
    let (app, repo, _) = app(Reply::WrongLength);

    let response = app.oneshot(post_json("/", job_payload())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "DATABASE_ERROR");
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_search_by_vector_orders_by_distance() {
    let repo = InMemoryJobRepository::new(DIM);
    for (title, axis) in [("x", 0), ("y", 1), ("z", 2)] {
        repo.create(NewJob {
            title: title.to_string(),
            description: "d".to_string(),
            requirements: "r".to_string(),
            embedding: TestDataBuilder::unit_vector(DIM, axis),
        })
        .await
        .unwrap();
    }
    let embedder = StubEmbedder::new(Reply::Embed);
    let app = handlers::router(JobService::new(repo, embedder.clone()));

    let mut query = vec![0.0f32; DIM];
    query[1] = 1.0;
    query[2] = 0.5;

    let response = app
        .oneshot(post_json("/search", json!({ "vector": query, "limit": 2 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let jobs: Vec<Value> = json_body(response.into_body()).await;
    let titles: Vec<_> = jobs.iter().map(|j| j["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["y", "z"]);
    assert!(jobs[0].get("embedding").is_none());
    assert!(embedder.calls().is_empty());
}

#[tokio::test]
async fn test_search_by_text_embeds_query() {
    let (app, repo, embedder) = app(Reply::Embed);
    let created = repo
        .create(NewJob {
            title: "Dev".to_string(),
            description: "Ship".to_string(),
            requirements: "Rust".to_string(),
            embedding: TestDataBuilder::unit_vector(DIM, "rust".len()),
        })
        .await
        .unwrap();

    let response = app
        .oneshot(post_json("/search", json!({ "query": "rust" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let jobs: Vec<JobResponse> = json_body(response.into_body()).await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, created.id);
    assert_eq!(embedder.calls(), vec!["rust"]);
}

#[tokio::test]
async fn test_search_with_zero_limit_returns_empty() {
    let (app, _, embedder) = app(Reply::Embed);

    let response = app
        .oneshot(post_json("/search", json!({ "query": "rust", "limit": 0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let jobs: Vec<Value> = json_body(response.into_body()).await;
    assert!(jobs.is_empty());
    assert!(embedder.calls().is_empty());
}

#[tokio::test]
async fn test_search_requires_query_or_vector() {
    let (app, _, _) = app(Reply::Embed);

    let response = app
        .oneshot(post_json("/search", json!({ "limit": 5 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_wrong_length_vector_is_400() {
    let (app, _, _) = app(Reply::Embed);

    let response = app
        .oneshot(post_json("/search", json!({ "vector": [1.0, 0.0] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_search_non_finite_vector_is_400() {
    let (app, _, embedder) = app(Reply::Embed);

    // 1e39 overflows f32 and deserializes to infinity
    let response = app
        .oneshot(post_json("/search", json!({ "vector": [1e39, 0.0, 0.0, 0.0] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
    assert!(embedder.calls().is_empty());
}
