//! Schema error types
//!
//! A single [`SchemaError`] carries every field that failed validation so the
//! caller can report them in one response.

use std::fmt;

use thiserror::Error;

use super::types::StudentField;

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: StudentField,
    pub message: String,
}

impl FieldViolation {
    /// The field was absent or blank.
    pub fn required(field: StudentField) -> Self {
        Self {
            field,
            message: format!("Path `{}` is required.", field.as_str()),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

/// Document rejected by the student schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Student validation failed: {}", join_violations(.violations))]
pub struct SchemaError {
    violations: Vec<FieldViolation>,
}

impl SchemaError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Returns the failing fields in schema order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns whether the given field is among the failures.
    pub fn has_field(&self, field: StudentField) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for schema validation
pub type SchemaResult<T> = Result<T, SchemaError>;
