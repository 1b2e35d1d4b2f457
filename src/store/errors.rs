//! Record store errors

use thiserror::Error;

use crate::schema::{SchemaError, StudentField};
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No live record with this id
    #[error("Student not found")]
    NotFound { id: String },

    /// A unique field collides with another record
    #[error("Duplicate key: {field} \"{value}\" already exists")]
    DuplicateKey { field: StudentField, value: String },

    /// Document rejected by the schema
    #[error(transparent)]
    Validation(#[from] SchemaError),

    /// Durable storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Store state cannot be reached (e.g. poisoned lock)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Whether the caller sent something the store refused.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound { .. } | StoreError::DuplicateKey { .. } | StoreError::Validation(_)
        )
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
