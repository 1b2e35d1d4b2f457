//! Student document types
//!
//! Wire shape (camelCase JSON):
//!
//! ```text
//! { "id", "name", "email", "contact", "department", "createdAt", "updatedAt" }
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The user-editable fields of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentField {
    Name,
    Email,
    Contact,
    Department,
}

impl StudentField {
    /// All editable fields in schema order
    pub const ALL: [StudentField; 4] = [
        StudentField::Name,
        StudentField::Email,
        StudentField::Contact,
        StudentField::Department,
    ];

    /// Returns the JSON key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentField::Name => "name",
            StudentField::Email => "email",
            StudentField::Contact => "contact",
            StudentField::Department => "department",
        }
    }
}

impl fmt::Display for StudentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Store-assigned identifier, immutable after insert
    pub id: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Builds a fresh record from validated fields.
    pub fn from_fields(id: impl Into<String>, fields: StudentFields, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            email: fields.email,
            contact: fields.contact,
            department: fields.department,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the value of an editable field.
    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::Name => &self.name,
            StudentField::Email => &self.email,
            StudentField::Contact => &self.contact,
            StudentField::Department => &self.department,
        }
    }

    /// Applies a validated patch and bumps `updated_at`.
    pub fn apply(&mut self, patch: StudentPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(contact) = patch.contact {
            self.contact = contact;
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
        self.updated_at = now;
    }

    /// Every field rendered as text, including id and timestamps.
    ///
    /// Used by display-side search, which matches against all of them.
    pub fn field_values(&self) -> [String; 7] {
        [
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.contact.clone(),
            self.department.clone(),
            self.created_at.to_rfc3339(),
            self.updated_at.to_rfc3339(),
        ]
    }
}

/// Validated insert fields, produced by the schema validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub department: String,
}

/// Create request body.
///
/// Every field is optional on the wire so that a missing field is reported
/// as a schema violation instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl NewStudent {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        contact: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            contact: Some(contact.into()),
            department: Some(department.into()),
        }
    }

    pub fn get(&self, field: StudentField) -> Option<&str> {
        match field {
            StudentField::Name => self.name.as_deref(),
            StudentField::Email => self.email.as_deref(),
            StudentField::Contact => self.contact.as_deref(),
            StudentField::Department => self.department.as_deref(),
        }
    }
}

/// Update request body. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl StudentPatch {
    /// Sets one field, builder style.
    pub fn with(mut self, field: StudentField, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    pub fn get(&self, field: StudentField) -> Option<&str> {
        match field {
            StudentField::Name => self.name.as_deref(),
            StudentField::Email => self.email.as_deref(),
            StudentField::Contact => self.contact.as_deref(),
            StudentField::Department => self.department.as_deref(),
        }
    }

    pub fn set(&mut self, field: StudentField, value: Option<String>) {
        match field {
            StudentField::Name => self.name = value,
            StudentField::Email => self.email = value,
            StudentField::Contact => self.contact = value,
            StudentField::Department => self.department = value,
        }
    }

    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        StudentField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}
