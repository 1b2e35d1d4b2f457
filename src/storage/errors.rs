//! Storage error types
//!
//! I/O failures are per-operation errors. Corruption means the log can no
//! longer be trusted and the store must refuse to open.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Disk I/O failure
    #[error("Storage I/O error: {message}: {source}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Checksum or framing failure in the log
    #[error("Data corruption at byte offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// A failed append could not be rolled back; the log tail is unknown
    #[error("Storage writer disabled: failed write at offset {offset} could not be rolled back")]
    Poisoned { offset: u64 },
}

impl StorageError {
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Corruption and a poisoned writer cannot be recovered from at runtime.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StorageError::Corruption { .. } | StorageError::Poisoned { .. }
        )
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
