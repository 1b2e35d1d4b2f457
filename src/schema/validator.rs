//! Schema validator for student documents
//!
//! Validation semantics:
//! - Insert: every field present and non-blank
//! - Update: every *present* field non-blank; absent fields untouched
//! - `name` is trimmed before storage
//!
//! The validator does not look at other records. Uniqueness belongs to the
//! store, which owns the email index.

use super::errors::{FieldViolation, SchemaError, SchemaResult};
use super::types::{NewStudent, StudentField, StudentFields, StudentPatch};

/// Stateless validator for the student schema.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validates a create request and returns the normalized fields.
    pub fn validate_new(doc: &NewStudent) -> SchemaResult<StudentFields> {
        let mut violations = Vec::new();
        let mut take = |field: StudentField| {
            let value = normalize(field, doc.get(field));
            if value.is_none() {
                violations.push(FieldViolation::required(field));
            }
            value.unwrap_or_default()
        };

        let fields = StudentFields {
            name: take(StudentField::Name),
            email: take(StudentField::Email),
            contact: take(StudentField::Contact),
            department: take(StudentField::Department),
        };

        if violations.is_empty() {
            Ok(fields)
        } else {
            Err(SchemaError::new(violations))
        }
    }

    /// Validates an update request and returns the normalized patch.
    pub fn validate_patch(patch: &StudentPatch) -> SchemaResult<StudentPatch> {
        let mut violations = Vec::new();
        let mut normalized = StudentPatch::default();

        for field in StudentField::ALL {
            let Some(raw) = patch.get(field) else {
                continue;
            };
            match normalize(field, Some(raw)) {
                Some(value) => normalized.set(field, Some(value)),
                None => violations.push(FieldViolation::required(field)),
            }
        }

        if violations.is_empty() {
            Ok(normalized)
        } else {
            Err(SchemaError::new(violations))
        }
    }
}

/// Returns the stored form of a field, or None if it is missing or blank.
fn normalize(field: StudentField, value: Option<&str>) -> Option<String> {
    let value = value?;
    if value.trim().is_empty() {
        return None;
    }
    match field {
        StudentField::Name => Some(value.trim().to_string()),
        _ => Some(value.to_string()),
    }
}
