//! Student schema for rollbook
//!
//! The schema is enforced at the persistence boundary: every insert and
//! update passes through [`SchemaValidator`] before a store touches disk.
//!
//! # Rules
//!
//! - `name`, `email`, `contact` and `department` are required on insert
//! - A present field must be non-empty after trimming
//! - `name` is stored trimmed
//! - Every failing field is reported, not just the first

mod errors;
mod types;
mod validator;

pub use errors::{FieldViolation, SchemaError, SchemaResult};
pub use types::{NewStudent, Student, StudentField, StudentFields, StudentPatch};
pub use validator::SchemaValidator;
