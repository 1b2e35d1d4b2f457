//! # REST API Errors
//!
//! Every error body is `{ "message": ..., "code": ... }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Document rejected by the schema
    #[error("{0}")]
    Validation(String),

    /// Unique field already in use
    #[error("{0}")]
    DuplicateKey(String),

    /// Body is not valid JSON or has the wrong shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// No record with the requested id
    #[error("Student not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store could not be reached or failed to persist
    #[error("{0}")]
    StoreUnavailable(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::DuplicateKey(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            RestError::NotFound => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            RestError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code carried in the error body
    pub fn code(&self) -> &'static str {
        match self {
            RestError::Validation(_) => "VALIDATION_FAILED",
            RestError::DuplicateKey(_) => "DUPLICATE_KEY",
            RestError::InvalidBody(_) => "INVALID_BODY",
            RestError::NotFound => "NOT_FOUND",
            RestError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            RestError::Internal(_) => "INTERNAL",
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => RestError::NotFound,
            StoreError::DuplicateKey { .. } => RestError::DuplicateKey(err.to_string()),
            StoreError::Validation(e) => RestError::Validation(e.to_string()),
            StoreError::Storage(e) => RestError::StoreUnavailable(e.to_string()),
            StoreError::Unavailable(_) => RestError::StoreUnavailable(err.to_string()),
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::InvalidBody(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self {
            message: err.to_string(),
            code: err.code().to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "request failed");
        } else {
            warn!(code = self.code(), error = %self, "request rejected");
        }

        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
