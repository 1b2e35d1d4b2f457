//! # Response Formatting
//!
//! Bodies that are not a bare student or student list.

use serde::{Deserialize, Serialize};

/// Delete confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn success() -> Self {
        Self {
            message: "Student deleted successfully".to_string(),
        }
    }
}
