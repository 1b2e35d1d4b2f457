//! Student form: the draft buffer and its pre-submission checks
//!
//! Validation here is a local gate only. The service validates again.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{NewStudent, Student, StudentField, StudentPatch};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid name regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid contact regex"));

/// Field-level messages from the last validation, keyed by field.
pub type FormErrors = BTreeMap<StudentField, String>;

/// In-progress, not-yet-submitted student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    /// Set when editing an existing record
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub department: String,
}

impl StudentDraft {
    pub fn from_student(student: &Student) -> Self {
        Self {
            id: Some(student.id.clone()),
            name: student.name.clone(),
            email: student.email.clone(),
            contact: student.contact.clone(),
            department: student.department.clone(),
        }
    }

    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::Name => &self.name,
            StudentField::Email => &self.email,
            StudentField::Contact => &self.contact,
            StudentField::Department => &self.department,
        }
    }

    pub fn set(&mut self, field: StudentField, value: impl Into<String>) {
        let value = value.into();
        match field {
            StudentField::Name => self.name = value,
            StudentField::Email => self.email = value,
            StudentField::Contact => self.contact = value,
            StudentField::Department => self.department = value,
        }
    }

    /// Create request carrying every field.
    pub fn to_new_student(&self) -> NewStudent {
        NewStudent::new(
            self.name.clone(),
            self.email.clone(),
            self.contact.clone(),
            self.department.clone(),
        )
    }

    /// Update request carrying every field; the form always sends the full record.
    pub fn to_patch(&self) -> StudentPatch {
        StudentField::ALL
            .into_iter()
            .fold(StudentPatch::default(), |patch, field| {
                patch.with(field, self.get(field))
            })
    }

    /// Runs every field check and returns the failures.
    pub fn validate(&self) -> FormErrors {
        StudentField::ALL
            .into_iter()
            .filter_map(|field| validate_field(field, self.get(field)).map(|msg| (field, msg)))
            .collect()
    }
}

/// Checks one field, returning the message to show if it fails.
pub fn validate_field(field: StudentField, value: &str) -> Option<String> {
    let trimmed = value.trim();
    let message = match field {
        StudentField::Name => {
            if trimmed.is_empty() {
                "Name is required"
            } else if trimmed.chars().count() < 2 {
                "Name must be at least 2 characters"
            } else if !NAME_RE.is_match(value) {
                "Name should contain only letters"
            } else {
                return None;
            }
        }
        StudentField::Email => {
            if trimmed.is_empty() {
                "Email is required"
            } else if !EMAIL_RE.is_match(value) {
                "Invalid email format"
            } else {
                return None;
            }
        }
        StudentField::Contact => {
            let digits: String = value
                .chars()
                .filter(|c| *c != '-' && !c.is_whitespace())
                .collect();
            if trimmed.is_empty() {
                "Contact is required"
            } else if !CONTACT_RE.is_match(&digits) {
                "Contact must be 10 digits"
            } else {
                return None;
            }
        }
        StudentField::Department => {
            if trimmed.is_empty() {
                "Department is required"
            } else if trimmed.chars().count() < 2 {
                "Department must be at least 2 characters"
            } else {
                return None;
            }
        }
    };
    Some(message.to_string())
}
