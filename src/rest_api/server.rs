//! # REST API HTTP Server
//!
//! Axum router for the student collection.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::schema::{NewStudent, Student, StudentPatch};
use crate::store::StudentStore;

use super::errors::{RestError, RestResult};
use super::handler::StudentService;
use super::response::DeleteResponse;

/// Collection path for student records
pub const STUDENTS_PATH: &str = "/api/students";

/// REST API server state
pub struct RestServer<S: StudentStore> {
    service: StudentService<S>,
}

impl<S: StudentStore + 'static> RestServer<S> {
    pub fn new(store: S) -> Self {
        Self::from_service(StudentService::new(store))
    }

    pub fn from_service(service: StudentService<S>) -> Self {
        Self { service }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route(
                STUDENTS_PATH,
                get(list_handler::<S>).post(create_handler::<S>),
            )
            .route(
                &format!("{}/:id", STUDENTS_PATH),
                put(update_handler::<S>).delete(delete_handler::<S>),
            )
            .with_state(state)
    }
}

/// Shared state type
type ServerState<S> = Arc<RestServer<S>>;

/// Runs a store-backed operation on the blocking pool. Store calls may fsync.
async fn blocking<S, T, F>(server: ServerState<S>, op: F) -> RestResult<T>
where
    S: StudentStore + 'static,
    T: Send + 'static,
    F: FnOnce(&StudentService<S>) -> RestResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&server.service))
        .await
        .map_err(|e| RestError::Internal(format!("store task failed: {}", e)))?
}

/// List records handler
async fn list_handler<S: StudentStore + 'static>(
    State(server): State<ServerState<S>>,
) -> RestResult<Json<Vec<Student>>> {
    let students = blocking(server, |service| service.list()).await?;
    Ok(Json(students))
}

/// Create record handler
async fn create_handler<S: StudentStore + 'static>(
    State(server): State<ServerState<S>>,
    body: Result<Json<NewStudent>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Student>)> {
    let Json(doc) = body?;
    let student = blocking(server, move |service| service.create(doc)).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Update record handler
async fn update_handler<S: StudentStore + 'static>(
    State(server): State<ServerState<S>>,
    Path(id): Path<String>,
    body: Result<Json<StudentPatch>, JsonRejection>,
) -> RestResult<Json<Student>> {
    let Json(patch) = body?;
    let student = blocking(server, move |service| service.update(&id, patch)).await?;
    Ok(Json(student))
}

/// Delete record handler
async fn delete_handler<S: StudentStore + 'static>(
    State(server): State<ServerState<S>>,
    Path(id): Path<String>,
) -> RestResult<Json<DeleteResponse>> {
    let response = blocking(server, move |service| service.delete(&id)).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_router_builds() {
        let _router = RestServer::new(MemoryStore::new()).router();
    }
}
