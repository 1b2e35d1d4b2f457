//! HTTP Client Transport Tests
//!
//! Runs the real server on an ephemeral loopback port and drives it through
//! `HttpStudentApi`, checking how statuses and error bodies reach the client.

use std::future::pending;

use rollbook::http_server::{HttpServer, HttpServerConfig};
use rollbook::schema::{NewStudent, StudentField, StudentPatch};
use rollbook::store::MemoryStore;
use rollbook::ui::{ApiError, HttpStudentApi, StudentApi};
use tokio::net::TcpListener;

// =============================================================================
// Test Utilities
// =============================================================================

/// Starts a server over an empty memory store and returns its base URL.
async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(HttpServerConfig::default(), MemoryStore::new());

    tokio::spawn(server.serve_until(listener, pending()));
    format!("http://{}", addr)
}

fn ann() -> NewStudent {
    NewStudent::new("Ann Lee", "ann@x.com", "1234567890", "CS")
}

fn service_error(err: ApiError) -> (u16, String, Option<String>) {
    match err {
        ApiError::Service {
            status,
            message,
            code,
        } => (status, message, code),
        other => panic!("expected a service error, got {other}"),
    }
}

// =============================================================================
// Round trip
// =============================================================================

#[tokio::test]
async fn test_create_update_delete_over_http() {
    let api = HttpStudentApi::new(spawn_server().await);

    let created = api.create(&ann()).await.unwrap();
    assert_eq!(created.name, "Ann Lee");
    assert_eq!(api.list().await.unwrap(), vec![created.clone()]);

    let updated = api
        .update(
            &created.id,
            &StudentPatch::default().with(StudentField::Department, "Math"),
        )
        .await
        .unwrap();
    assert_eq!(updated.department, "Math");
    assert_eq!(updated.email, "ann@x.com");

    let deleted = api.delete(&created.id).await.unwrap();
    assert_eq!(deleted.message, "Student deleted successfully");
    assert!(api.list().await.unwrap().is_empty());
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn test_duplicate_email_carries_code() {
    let api = HttpStudentApi::new(spawn_server().await);
    api.create(&ann()).await.unwrap();

    let (status, _, code) = service_error(api.create(&ann()).await.unwrap_err());
    assert_eq!(status, 400);
    assert_eq!(code.as_deref(), Some("DUPLICATE_KEY"));
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let api = HttpStudentApi::new(spawn_server().await);

    let (status, message, code) = service_error(api.delete("missing").await.unwrap_err());
    assert_eq!(status, 404);
    assert_eq!(message, "Student not found");
    assert_eq!(code.as_deref(), Some("NOT_FOUND"));

    let patch = StudentPatch::default().with(StudentField::Name, "Bo Chan");
    let (status, _, _) = service_error(api.update("missing", &patch).await.unwrap_err());
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_id_with_slash_stays_one_segment() {
    let api = HttpStudentApi::new(spawn_server().await);

    let (status, message, code) = service_error(api.delete("a/b").await.unwrap_err());
    assert_eq!(status, 404);
    assert_eq!(message, "Student not found");
    assert_eq!(code.as_deref(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_unknown_route_falls_back_to_reason() {
    let base = spawn_server().await;
    let api = HttpStudentApi::new(format!("{}/elsewhere", base));

    let (status, message, code) = service_error(api.list().await.unwrap_err());
    assert_eq!(status, 404);
    assert_eq!(message, "Not Found");
    assert_eq!(code, None);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpStudentApi::new(format!("http://{}", addr));
    assert!(matches!(api.list().await, Err(ApiError::Transport(_))));
}
