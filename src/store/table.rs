//! In-memory student table shared by both store implementations
//!
//! Mutations are split into a `prepare_*` step that validates and builds the
//! resulting record without touching the table, and a `commit`/`remove` step
//! that applies it. The file store persists between the two, so a failed
//! write leaves the table unchanged.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use crate::schema::{NewStudent, SchemaValidator, Student, StudentField, StudentPatch};

#[derive(Debug, Default)]
pub(crate) struct StudentTable {
    /// id -> record
    records: HashMap<String, Student>,
    /// Insertion order of live ids
    order: Vec<String>,
    /// email -> id
    emails: HashMap<String, String>,
}

impl StudentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.records.get(id)
    }

    pub fn list(&self) -> Vec<Student> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .cloned()
            .collect()
    }

    /// Validates a create request and builds the record to store.
    pub fn prepare_insert(&self, doc: &NewStudent, now: DateTime<Utc>) -> StoreResult<Student> {
        let fields = SchemaValidator::validate_new(doc)?;
        self.check_email(&fields.email, None)?;

        let mut id = Uuid::new_v4().to_string();
        while self.records.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }

        Ok(Student::from_fields(id, fields, now))
    }

    /// Validates an update and builds the post-update record.
    pub fn prepare_update(
        &self,
        id: &str,
        patch: &StudentPatch,
        now: DateTime<Utc>,
    ) -> StoreResult<Student> {
        let current = self.records.get(id).ok_or_else(|| StoreError::not_found(id))?;
        let patch = SchemaValidator::validate_patch(patch)?;

        if let Some(email) = patch.email.as_deref() {
            self.check_email(email, Some(id))?;
        }

        let mut updated = current.clone();
        updated.apply(patch, now);
        Ok(updated)
    }

    /// Inserts or replaces a record, keeping its original position.
    pub fn commit(&mut self, student: Student) {
        match self.records.get(&student.id) {
            Some(previous) => {
                if previous.email != student.email {
                    self.emails.remove(&previous.email);
                }
            }
            None => self.order.push(student.id.clone()),
        }

        self.emails.insert(student.email.clone(), student.id.clone());
        self.records.insert(student.id.clone(), student);
    }

    /// Removes a record, or fails with NotFound.
    pub fn remove(&mut self, id: &str) -> StoreResult<Student> {
        let removed = self.records.remove(id).ok_or_else(|| StoreError::not_found(id))?;
        self.order.retain(|existing| existing != id);
        if self.emails.get(&removed.email).map(String::as_str) == Some(id) {
            self.emails.remove(&removed.email);
        }
        Ok(removed)
    }

    /// Rejects `email` if a record other than `except` already uses it.
    fn check_email(&self, email: &str, except: Option<&str>) -> StoreResult<()> {
        match self.emails.get(email) {
            Some(owner) if Some(owner.as_str()) != except => Err(StoreError::DuplicateKey {
                field: StudentField::Email,
                value: email.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
