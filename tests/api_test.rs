//! Integration tests for API endpoints.
//!
//! These tests drive the full router with a stateful in-memory user
//! service and a mock database connection, so no real infrastructure
//! is required.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::{json, Value};
use tower::ServiceExt;

use user_api::api::{create_router, AppState};
use user_api::config::{Descriptor, ResourceDescriptors};
use user_api::domain::User;
use user_api::errors::{AppError, AppResult};
use user_api::infra::Database;
use user_api::services::UserService;

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Stateful in-memory user service backing the router under test.
struct InMemoryUserService {
    descriptor: Arc<Descriptor>,
    users: Mutex<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserService {
    fn new() -> Self {
        Self {
            descriptor: ResourceDescriptors::builtin().user(),
            users: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserService for InMemoryUserService {
    fn descriptor(&self) -> Arc<Descriptor> {
        self.descriptor.clone()
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.users
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn create_user(
        &self,
        name: String,
        email: Option<String>,
        password: Option<String>,
    ) -> AppResult<User> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let user = User {
            id,
            name,
            email,
            password_hash: password.map(|p| format!("hashed:{}", p)),
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(id, user.clone());
        Ok(user)
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

/// Build a router backed by the in-memory service and a mock connection.
fn test_app() -> Router {
    let database = Arc::new(Database::from_connection(
        MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
    ));
    let state = AppState::new(Arc::new(InMemoryUserService::new()), database);
    create_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Descriptor Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_describe_returns_non_empty_mapping() {
    let app = test_app();

    let response = app.oneshot(get("/api/user")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let object = body.as_object().expect("descriptor should be an object");
    assert!(!object.is_empty());
    assert_eq!(object["resource"], "user");
}

#[tokio::test]
async fn test_describe_identical_across_calls_and_writes() {
    let app = test_app();

    let first = body_json(app.clone().oneshot(get("/api/user")).await.unwrap()).await;

    // A write in between must not change the descriptor
    let created = app
        .clone()
        .oneshot(post_json("/api/user", json!({"name": "Interloper"})))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let second = body_json(app.oneshot(get("/api/user")).await.unwrap()).await;
    assert_eq!(first, second);
}

// =============================================================================
// Create / Get User Tests
// =============================================================================

#[tokio::test]
async fn test_create_user_returns_exact_minimal_body() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/api/user", json!({"name": "Alice"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Absent fields are omitted entirely, not serialized as null
    let body = body_json(response).await;
    assert_eq!(body, json!({"id": 1, "name": "Alice"}));
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = test_app();

    let created = app
        .clone()
        .oneshot(post_json(
            "/api/user",
            json!({"name": "Alice", "email": "alice@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created_body = body_json(created).await;

    let fetched = app.oneshot(get("/api/user/1")).await.unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched_body = body_json(fetched).await;

    assert_eq!(
        fetched_body,
        json!({"id": 1, "name": "Alice", "email": "alice@example.com"})
    );
    assert_eq!(created_body, fetched_body);
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let app = test_app();

    let first = body_json(
        app.clone()
            .oneshot(post_json("/api/user", json!({"name": "Alice"})))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app.oneshot(post_json("/api/user", json!({"name": "Alice"})))
            .await
            .unwrap(),
    )
    .await;

    // Same payload twice creates two distinct users
    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/api/user", json!({"id": 42, "name": "Alice"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_create_never_echoes_password() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/user",
            json!({"name": "Bob", "password": "long-enough-secret"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body, json!({"id": 1, "name": "Bob"}));

    let fetched = body_json(app.oneshot(get("/api/user/1")).await.unwrap()).await;
    assert!(fetched.get("password").is_none());
    assert!(fetched.get("password_hash").is_none());
}

#[tokio::test]
async fn test_get_missing_user_returns_not_found() {
    let app = test_app();

    let response = app.oneshot(get("/api/user/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_user_rejects_non_numeric_id() {
    let app = test_app();

    let response = app.oneshot(get("/api/user/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[tokio::test]
async fn test_create_rejects_empty_name() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/api/user", json!({"name": ""})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Name is required");
}

#[tokio::test]
async fn test_create_rejects_missing_name() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/api/user", json!({"email": "alice@example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/user")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_rejects_invalid_email() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/api/user",
            json!({"name": "Alice", "email": "not-an-email"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_rejects_short_password() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/api/user",
            json!({"name": "Alice", "password": "short"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Service Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_root_endpoint() {
    let app = test_app();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"User API");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app();

    let response = app.oneshot(get("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["info"]["title"], "User API");
    assert!(body["paths"].get("/api/user").is_some());
    assert!(body["paths"].get("/api/user/{id}").is_some());
}

#[tokio::test]
async fn test_health_healthy_when_database_responds() {
    let database = Arc::new(Database::from_connection(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection(),
    ));
    let state = AppState::new(Arc::new(InMemoryUserService::new()), database);
    let app = create_router(state);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_degraded_when_database_fails() {
    // No queued exec results, so the connectivity check errors out
    let app = test_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
}
