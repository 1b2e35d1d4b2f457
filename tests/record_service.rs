//! Record Service HTTP Contract Tests
//!
//! Drives the full router (health, CORS, tracing, student routes) in-process
//! with `tower::ServiceExt::oneshot`. No sockets are opened.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use rollbook::http_server::{HttpServer, HttpServerConfig};
use rollbook::schema::{NewStudent, Student, StudentPatch};
use rollbook::store::{DatabaseUrl, MemoryStore, StoreError, StoreResult, StudentStore};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

fn router_over<S: StudentStore + 'static>(store: S) -> Router {
    HttpServer::new(HttpServerConfig::default(), store).router()
}

fn memory_router() -> Router {
    router_over(MemoryStore::new())
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    send_request(router, request).await
}

async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// A store whose backend is gone: every call fails.
struct UnavailableStore;

impl UnavailableStore {
    fn down<T>() -> StoreResult<T> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }
}

impl StudentStore for UnavailableStore {
    fn list(&self) -> StoreResult<Vec<Student>> {
        Self::down()
    }

    fn insert(&self, _doc: NewStudent) -> StoreResult<Student> {
        Self::down()
    }

    fn update(&self, _id: &str, _patch: StudentPatch) -> StoreResult<Student> {
        Self::down()
    }

    fn delete(&self, _id: &str) -> StoreResult<Student> {
        Self::down()
    }

    fn count(&self) -> StoreResult<usize> {
        Self::down()
    }

    fn kind(&self) -> &'static str {
        "unavailable"
    }
}

/// A store that panics inside the blocking task.
struct PanickingStore;

impl StudentStore for PanickingStore {
    fn list(&self) -> StoreResult<Vec<Student>> {
        panic!("store crashed")
    }

    fn insert(&self, _doc: NewStudent) -> StoreResult<Student> {
        panic!("store crashed")
    }

    fn update(&self, _id: &str, _patch: StudentPatch) -> StoreResult<Student> {
        panic!("store crashed")
    }

    fn delete(&self, _id: &str) -> StoreResult<Student> {
        panic!("store crashed")
    }

    fn count(&self) -> StoreResult<usize> {
        panic!("store crashed")
    }

    fn kind(&self) -> &'static str {
        "panicking"
    }
}

fn ann() -> Value {
    json!({
        "name": "Ann Lee",
        "email": "ann@x.com",
        "contact": "1234567890",
        "department": "CS"
    })
}

fn student(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "contact": "1234567890",
        "department": "CS"
    })
}

// =============================================================================
// Create / List
// =============================================================================

#[tokio::test]
async fn test_list_starts_empty() {
    let router = memory_router();
    let (status, body) = send(&router, "GET", "/api/students", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_assigns_id_and_timestamps() {
    let router = memory_router();
    let (status, body) = send(&router, "POST", "/api/students", Some(ann())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["name"], "Ann Lee");
    assert_eq!(body["email"], "ann@x.com");
    assert_eq!(body["contact"], "1234567890");
    assert_eq!(body["department"], "CS");
    assert!(body["createdAt"].is_string());
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn test_create_missing_field_is_rejected() {
    let router = memory_router();
    let (status, body) = send(
        &router,
        "POST",
        "/api/students",
        Some(json!({"name": "Ann Lee", "email": "ann@x.com", "contact": "1234567890"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["message"].as_str().unwrap().contains("department"));

    let (_, list) = send(&router, "GET", "/api/students", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_duplicate_email_leaves_one_record() {
    let router = memory_router();
    send(&router, "POST", "/api/students", Some(ann())).await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/students",
        Some(student("Bo Chan", "ann@x.com")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE_KEY");

    let (_, list) = send(&router, "GET", "/api/students", None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Ann Lee");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let router = memory_router();
    let request = Request::builder()
        .method("POST")
        .uri("/api/students")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send_request(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_BODY");
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn test_update_missing_id_creates_nothing() {
    let router = memory_router();
    let (status, body) = send(
        &router,
        "PUT",
        "/api/students/does-not-exist",
        Some(json!({"department": "Math"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");

    let (_, list) = send(&router, "GET", "/api/students", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_update_to_taken_email_is_rejected() {
    let router = memory_router();
    send(&router, "POST", "/api/students", Some(ann())).await;
    let (_, bo) = send(
        &router,
        "POST",
        "/api/students",
        Some(student("Bo Chan", "bo@x.com")),
    )
    .await;

    let uri = format!("/api/students/{}", bo["id"].as_str().unwrap());
    let (status, body) = send(&router, "PUT", &uri, Some(json!({"email": "ann@x.com"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE_KEY");
}

#[tokio::test]
async fn test_update_to_blank_email_is_rejected() {
    let router = memory_router();
    let (_, created) = send(&router, "POST", "/api/students", Some(ann())).await;
    let uri = format!("/api/students/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&router, "PUT", &uri, Some(json!({"email": " "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["message"].as_str().unwrap().contains("email"));

    let (_, list) = send(&router, "GET", "/api/students", None).await;
    assert_eq!(list[0]["email"], "ann@x.com");
}

#[tokio::test]
async fn test_delete_missing_id_is_not_found() {
    let router = memory_router();
    let (status, body) = send(&router, "DELETE", "/api/students/does-not-exist", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_count_after_creates_and_deletes() {
    let router = memory_router();
    let mut ids = Vec::new();
    for i in 0..5 {
        let (_, body) = send(
            &router,
            "POST",
            "/api/students",
            Some(student("Ann Lee", &format!("ann{}@x.com", i))),
        )
        .await;
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    for id in &ids[..2] {
        let (status, _) = send(&router, "DELETE", &format!("/api/students/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, list) = send(&router, "GET", "/api/students", None).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

// =============================================================================
// End-to-end scenario
// =============================================================================

#[tokio::test]
async fn test_create_update_delete_scenario() {
    let router = memory_router();

    let (status, created) = send(&router, "POST", "/api/students", Some(ann())).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/students/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&router, "PUT", &uri, Some(json!({"department": "Math"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["department"], "Math");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Ann Lee");
    assert_eq!(updated["email"], "ann@x.com");
    assert_eq!(updated["contact"], "1234567890");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, deleted) = send(&router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Student deleted successfully");

    let (status, _) = send(&router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&router, "GET", "/api/students", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_file_store_survives_restart() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let url = DatabaseUrl::File(dir.path().to_path_buf());

    let id = {
        let router = router_over(url.open().unwrap());
        let (_, created) = send(&router, "POST", "/api/students", Some(ann())).await;
        created["id"].as_str().unwrap().to_string()
    };

    let router = router_over(url.open().unwrap());
    let (_, list) = send(&router, "GET", "/api/students", None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id.as_str());
}

// =============================================================================
// Store failures
// =============================================================================

#[tokio::test]
async fn test_unavailable_store_is_server_error() {
    let router = router_over(UnavailableStore);

    let (status, body) = send(&router, "GET", "/api/students", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "STORE_UNAVAILABLE");
    assert!(body["message"].is_string());

    let (status, body) = send(&router, "POST", "/api/students", Some(ann())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "STORE_UNAVAILABLE");

    let (status, body) = send(&router, "DELETE", "/api/students/x", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn test_store_panic_is_internal_error() {
    let router = router_over(PanickingStore);

    let (status, body) = send(&router, "GET", "/api/students", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL");

    // The server keeps answering after a crashed call
    let (status, _) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let router = memory_router();
    let (status, body) = send(&router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
