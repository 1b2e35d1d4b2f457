//! Database connection strings
//!
//! - `memory://` selects [`MemoryStore`]
//! - `file://<dir>` or a bare path selects [`FileStore`] rooted at `<dir>`

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::errors::StoreResult;
use super::{FileStore, MemoryStore, StudentStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    Memory,
    File(PathBuf),
}

impl DatabaseUrl {
    /// Opens the store this URL names.
    pub fn open(&self) -> StoreResult<Box<dyn StudentStore>> {
        match self {
            DatabaseUrl::Memory => Ok(Box::new(MemoryStore::new())),
            DatabaseUrl::File(dir) => Ok(Box::new(FileStore::open(dir)?)),
        }
    }
}

impl FromStr for DatabaseUrl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("database url is empty".to_string());
        }

        if let Some(rest) = s.strip_prefix("memory://") {
            if rest.is_empty() {
                return Ok(DatabaseUrl::Memory);
            }
            return Err(format!("memory:// takes no path, got '{}'", rest));
        }

        if let Some(path) = s.strip_prefix("file://") {
            if path.is_empty() {
                return Err("file:// requires a directory".to_string());
            }
            return Ok(DatabaseUrl::File(PathBuf::from(path)));
        }

        if let Some((scheme, _)) = s.split_once("://") {
            return Err(format!(
                "Unsupported database scheme '{}'. Use memory:// or file://",
                scheme
            ));
        }

        Ok(DatabaseUrl::File(PathBuf::from(s)))
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseUrl::Memory => write!(f, "memory://"),
            DatabaseUrl::File(dir) => write!(f, "file://{}", dir.display()),
        }
    }
}
