//! # Student Service
//!
//! Translates record-service operations into store calls. Each call performs
//! at most one store mutation; there is no batching and no retry.

use std::sync::Arc;

use tracing::info;

use crate::schema::{NewStudent, Student, StudentPatch};
use crate::store::StudentStore;

use super::errors::RestResult;
use super::response::DeleteResponse;

/// The four student operations over an injected store handle.
pub struct StudentService<S: StudentStore> {
    store: Arc<S>,
}

impl<S: StudentStore> Clone for StudentService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: StudentStore> StudentService<S> {
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    /// List all records in store order.
    pub fn list(&self) -> RestResult<Vec<Student>> {
        Ok(self.store.list()?)
    }

    /// Create a record from caller-supplied fields.
    pub fn create(&self, doc: NewStudent) -> RestResult<Student> {
        let student = self.store.insert(doc)?;
        info!(id = %student.id, "student created");
        Ok(student)
    }

    /// Partially replace the fields of an existing record.
    pub fn update(&self, id: &str, patch: StudentPatch) -> RestResult<Student> {
        let student = self.store.update(id, patch)?;
        info!(id = %student.id, "student updated");
        Ok(student)
    }

    /// Remove a record.
    pub fn delete(&self, id: &str) -> RestResult<DeleteResponse> {
        let removed = self.store.delete(id)?;
        info!(id = %removed.id, "student deleted");
        Ok(DeleteResponse::success())
    }
}
