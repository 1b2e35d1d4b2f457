//! Record store interface
//!
//! [`StudentStore`] is the persistence boundary. Implementations enforce the
//! student schema and email uniqueness; callers never see a record that
//! violates either.
//!
//! - [`MemoryStore`]: process-local, for tests and `memory://`
//! - [`FileStore`]: durable, backed by the append-only document log

mod errors;
mod file;
mod memory;
mod table;
mod url;

pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use url::DatabaseUrl;

use crate::schema::{NewStudent, Student, StudentPatch};

/// Persistence operations for student records.
pub trait StudentStore: Send + Sync {
    /// All live records in insertion order.
    fn list(&self) -> StoreResult<Vec<Student>>;

    /// Validates and persists a new record, assigning its id and timestamps.
    fn insert(&self, doc: NewStudent) -> StoreResult<Student>;

    /// Applies a partial update and returns the post-update record.
    fn update(&self, id: &str, patch: StudentPatch) -> StoreResult<Student>;

    /// Removes a record and returns it.
    fn delete(&self, id: &str) -> StoreResult<Student>;

    /// Number of live records.
    fn count(&self) -> StoreResult<usize>;

    /// Short name for logs ("memory", "file").
    fn kind(&self) -> &'static str;
}

impl<S: StudentStore + ?Sized> StudentStore for Box<S> {
    fn list(&self) -> StoreResult<Vec<Student>> {
        (**self).list()
    }

    fn insert(&self, doc: NewStudent) -> StoreResult<Student> {
        (**self).insert(doc)
    }

    fn update(&self, id: &str, patch: StudentPatch) -> StoreResult<Student> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: &str) -> StoreResult<Student> {
        (**self).delete(id)
    }

    fn count(&self) -> StoreResult<usize> {
        (**self).count()
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }
}
