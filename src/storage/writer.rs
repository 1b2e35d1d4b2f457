//! Storage writer with fsync enforcement
//!
//! A write is not acknowledged until the record has been appended and the
//! file synced. The log is append-only; updates append a new full document.
//!
//! A failed append is rolled back by truncating to the offset it started at,
//! so the log never keeps a torn or unacknowledged record. If the rollback
//! itself fails the writer is poisoned and refuses every later append.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{error, warn};

use super::errors::{StorageError, StorageResult};
use super::record::DocumentRecord;
use super::LOG_FILE_NAME;

/// Byte sink under the writer.
pub(crate) trait LogSink: Write + Send {
    fn sync(&mut self) -> io::Result<()>;
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl LogSink for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Append-only writer for `<data_dir>/students.dat`.
pub struct StorageWriter {
    storage_path: PathBuf,
    sink: Box<dyn LogSink>,
    current_offset: u64,
    poisoned: bool,
}

fn open_log(data_dir: &Path) -> StorageResult<(PathBuf, File, u64)> {
    if !data_dir.exists() {
        fs::create_dir_all(data_dir).map_err(|e| {
            StorageError::io(
                format!("Failed to create data directory: {}", data_dir.display()),
                e,
            )
        })?;
    }

    let storage_path = data_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(&storage_path)
        .map_err(|e| {
            StorageError::io(
                format!("Failed to open storage file: {}", storage_path.display()),
                e,
            )
        })?;

    let len = file
        .metadata()
        .map_err(|e| StorageError::io("Failed to read file metadata", e))?
        .len();

    Ok((storage_path, file, len))
}

impl StorageWriter {
    /// Opens or creates the log inside `data_dir`, creating the directory if
    /// needed.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let (storage_path, file, len) = open_log(data_dir)?;
        Ok(Self::from_sink(storage_path, Box::new(file), len))
    }

    fn from_sink(storage_path: PathBuf, sink: Box<dyn LogSink>, current_offset: u64) -> Self {
        Self {
            storage_path,
            sink,
            current_offset,
            poisoned: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Appends a record and fsyncs. Returns the offset it was written at.
    ///
    /// On failure nothing of the record remains in the log.
    pub fn append(&mut self, record: &DocumentRecord) -> StorageResult<u64> {
        let offset = self.current_offset;
        if self.poisoned {
            return Err(StorageError::Poisoned { offset });
        }

        let serialized = record.serialize();
        if let Err(err) = self.write_and_sync(record, &serialized) {
            self.rollback(offset)?;
            return Err(err);
        }

        self.current_offset += serialized.len() as u64;
        Ok(offset)
    }

    fn write_and_sync(&mut self, record: &DocumentRecord, bytes: &[u8]) -> StorageResult<()> {
        self.sink.write_all(bytes).map_err(|e| {
            StorageError::io(
                format!("Failed to write document: {}", record.document_id),
                e,
            )
        })?;

        self.sink.sync().map_err(|e| {
            StorageError::io(
                format!("fsync failed after writing document: {}", record.document_id),
                e,
            )
        })
    }

    fn rollback(&mut self, offset: u64) -> StorageResult<()> {
        match self
            .sink
            .truncate(offset)
            .and_then(|()| self.sink.sync())
        {
            Ok(()) => {
                warn!(offset, "failed append rolled back");
                Ok(())
            }
            Err(e) => {
                error!(offset, error = %e, "rollback failed, writer disabled");
                self.poisoned = true;
                Err(StorageError::Poisoned { offset })
            }
        }
    }
}
