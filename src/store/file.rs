//! Durable student store over the append-only document log
//!
//! On open the log is replayed front to back: a document record replaces any
//! earlier version of the same id, a tombstone removes it. The resulting
//! table is the live state. Each mutation appends and fsyncs *before* the
//! table is changed, so an acknowledged write is always on disk and a failed
//! write changes nothing.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, info};

use super::errors::{StoreError, StoreResult};
use super::table::StudentTable;
use super::StudentStore;
use crate::schema::{NewStudent, Student, StudentPatch};
use crate::storage::{DocumentRecord, StorageError, StorageReader, StorageWriter};

struct FileInner {
    table: StudentTable,
    writer: StorageWriter,
}

/// Student store persisted under a data directory.
pub struct FileStore {
    inner: Mutex<FileInner>,
}

impl FileStore {
    /// Opens (or creates) the store and replays its log.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the directory cannot be created or the
    /// log is corrupt.
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let writer = StorageWriter::open(data_dir.as_ref())?;
        Self::with_writer(writer)
    }

    fn with_writer(writer: StorageWriter) -> StoreResult<Self> {
        let table = replay(writer.path())?;

        info!(
            log = %writer.path().display(),
            records = table.len(),
            "student log replayed"
        );

        Ok(Self {
            inner: Mutex::new(FileInner { table, writer }),
        })
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, FileInner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("Lock poisoned".to_string()))
    }
}

impl FileInner {
    /// Appends one record. A disabled writer makes the store unavailable.
    fn append(&mut self, record: &DocumentRecord) -> StoreResult<u64> {
        self.writer.append(record).map_err(|e| match e {
            StorageError::Poisoned { .. } => StoreError::Unavailable(e.to_string()),
            other => other.into(),
        })
    }
}

fn replay(path: &Path) -> StoreResult<StudentTable> {
    let mut table = StudentTable::new();
    let mut reader = StorageReader::open(path)?;

    loop {
        let offset = reader.current_offset();
        let Some(record) = reader.read_next()? else {
            break;
        };

        if record.is_tombstone {
            // A tombstone for an id we never saw is harmless
            let _ = table.remove(&record.document_id);
            continue;
        }

        let student: Student = serde_json::from_slice(&record.document_body).map_err(|e| {
            StorageError::corruption_at_offset(offset, format!("Undecodable document: {}", e))
        })?;

        if student.id != record.document_id {
            return Err(StorageError::corruption_at_offset(
                offset,
                format!(
                    "Document id {} does not match record id {}",
                    student.id, record.document_id
                ),
            )
            .into());
        }

        table.commit(student);
    }

    Ok(table)
}

fn encode(student: &Student) -> StoreResult<DocumentRecord> {
    let body = serde_json::to_vec(student)
        .map_err(|e| StoreError::Unavailable(format!("Failed to encode document: {}", e)))?;
    Ok(DocumentRecord::document(student.id.clone(), body))
}

impl StudentStore for FileStore {
    fn list(&self) -> StoreResult<Vec<Student>> {
        Ok(self.lock()?.table.list())
    }

    fn insert(&self, doc: NewStudent) -> StoreResult<Student> {
        let mut inner = self.lock()?;
        let student = inner.table.prepare_insert(&doc, Utc::now())?;

        let offset = inner.append(&encode(&student)?)?;
        debug!(id = %student.id, offset, "student appended");

        inner.table.commit(student.clone());
        Ok(student)
    }

    fn update(&self, id: &str, patch: StudentPatch) -> StoreResult<Student> {
        let mut inner = self.lock()?;
        let student = inner.table.prepare_update(id, &patch, Utc::now())?;

        let offset = inner.append(&encode(&student)?)?;
        debug!(id = %student.id, offset, "student version appended");

        inner.table.commit(student.clone());
        Ok(student)
    }

    fn delete(&self, id: &str) -> StoreResult<Student> {
        let mut inner = self.lock()?;
        if inner.table.get(id).is_none() {
            return Err(StoreError::not_found(id));
        }

        let offset = inner.append(&DocumentRecord::tombstone(id))?;
        debug!(id, offset, "tombstone appended");

        inner.table.remove(id)
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.lock()?.table.len())
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}
