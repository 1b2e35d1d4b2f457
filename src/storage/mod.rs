//! Append-only document log backing the durable student store
//!
//! Every mutation appends one full record; nothing is rewritten in place.
//!
//! # Design Principles
//!
//! - Append-only (no in-place updates)
//! - Checksum-verified on every read
//! - Latest record wins for the same document id
//! - Deletes are tombstone records
//! - fsync before a write is acknowledged

mod checksum;
mod errors;
mod reader;
mod record;
mod writer;

pub use checksum::compute_checksum;
pub use errors::{StorageError, StorageResult};
pub use reader::StorageReader;
pub use record::DocumentRecord;
pub use writer::StorageWriter;

#[cfg(test)]
pub(crate) use writer::faults;

/// File name of the document log inside the data directory
pub const LOG_FILE_NAME: &str = "students.dat";
