//! # Student Board
//!
//! Client-side controller: holds the loaded list, the form, the active
//! notification and the search filter. Every mutation is followed by a
//! full re-list; there is no optimistic merge.

use std::time::Instant;

use tracing::{debug, warn};

use crate::schema::{Student, StudentField};

use super::api::StudentApi;
use super::form::{FormErrors, StudentDraft};
use super::notification::{Notification, Severity};

pub const MSG_FETCH_FAILED: &str = "Error fetching students";
pub const MSG_FIX_FORM: &str = "Please fix the errors in the form";
pub const MSG_ADDED: &str = "Student added successfully";
pub const MSG_UPDATED: &str = "Student updated successfully";
pub const MSG_SAVE_FAILED: &str = "Error saving student";
pub const MSG_DELETED: &str = "Student deleted successfully";
pub const MSG_DELETE_FAILED: &str = "Error deleting student";

/// What happened to a form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent
    Invalid,
    Created(Student),
    Updated(Student),
    /// The service rejected the request or could not be reached
    Failed,
}

/// What happened to a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
    Failed,
}

pub struct StudentBoard<A: StudentApi> {
    api: A,
    students: Vec<Student>,
    modal_open: bool,
    draft: StudentDraft,
    errors: FormErrors,
    notification: Option<Notification>,
    search: String,
}

impl<A: StudentApi> StudentBoard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            students: Vec::new(),
            modal_open: false,
            draft: StudentDraft::default(),
            errors: FormErrors::new(),
            notification: None,
            search: String::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Id of the record being edited, if any
    pub fn editing(&self) -> Option<&str> {
        self.draft.id.as_deref()
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// The notification still visible at `now`, if any.
    pub fn notification_at(&self, now: Instant) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|n| n.is_visible_at(now))
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.notification = Some(Notification::new(message, severity, Instant::now()));
    }

    /// Fetch the full list. On failure the previous list is kept and a
    /// danger notification is raised.
    pub async fn load(&mut self) -> bool {
        match self.api.list().await {
            Ok(students) => {
                debug!(count = students.len(), "students loaded");
                self.students = students;
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch students");
                self.notify(MSG_FETCH_FAILED, Severity::Danger);
                false
            }
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Records matching the search text in any field, ignoring case.
    pub fn visible_students(&self) -> Vec<&Student> {
        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return self.students.iter().collect();
        }

        self.students
            .iter()
            .filter(|s| {
                s.field_values()
                    .iter()
                    .any(|v| v.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn open_create(&mut self) {
        self.draft = StudentDraft::default();
        self.errors.clear();
        self.modal_open = true;
    }

    pub fn edit(&mut self, student: &Student) {
        self.draft = StudentDraft::from_student(student);
        self.errors.clear();
        self.modal_open = true;
    }

    pub fn close(&mut self) {
        self.modal_open = false;
        self.draft = StudentDraft::default();
        self.errors.clear();
    }

    /// Update one draft field; its stale error goes away.
    pub fn set_field(&mut self, field: StudentField, value: impl Into<String>) {
        self.draft.set(field, value);
        self.errors.remove(&field);
    }

    /// Validate the draft and send it as a create or an update.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let errors = self.draft.validate();
        if !errors.is_empty() {
            self.errors = errors;
            self.notify(MSG_FIX_FORM, Severity::Warning);
            return SubmitOutcome::Invalid;
        }

        let result = match self.draft.id.clone() {
            Some(id) => self
                .api
                .update(&id, &self.draft.to_patch())
                .await
                .map(SubmitOutcome::Updated),
            None => self
                .api
                .create(&self.draft.to_new_student())
                .await
                .map(SubmitOutcome::Created),
        };

        match result {
            Ok(outcome) => {
                let message = match outcome {
                    SubmitOutcome::Updated(_) => MSG_UPDATED,
                    _ => MSG_ADDED,
                };
                self.close();
                self.notify(message, Severity::Success);
                self.load().await;
                outcome
            }
            Err(e) => {
                warn!(error = %e, "failed to save student");
                self.notify(MSG_SAVE_FAILED, Severity::Danger);
                SubmitOutcome::Failed
            }
        }
    }

    /// Delete a record once `confirm` agrees.
    pub async fn delete(&mut self, id: &str, confirm: impl FnOnce() -> bool) -> DeleteOutcome {
        if !confirm() {
            return DeleteOutcome::Declined;
        }

        match self.api.delete(id).await {
            Ok(_) => {
                self.notify(MSG_DELETED, Severity::Success);
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                warn!(id, error = %e, "failed to delete student");
                self.notify(MSG_DELETE_FAILED, Severity::Danger);
                DeleteOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest_api::StudentService;
    use crate::store::MemoryStore;

    fn board() -> StudentBoard<StudentService<MemoryStore>> {
        StudentBoard::new(StudentService::new(MemoryStore::new()))
    }

    fn fill(board: &mut StudentBoard<StudentService<MemoryStore>>, name: &str, email: &str) {
        board.open_create();
        board.set_field(StudentField::Name, name);
        board.set_field(StudentField::Email, email);
        board.set_field(StudentField::Contact, "1234567890");
        board.set_field(StudentField::Department, "CS");
    }

    #[tokio::test]
    async fn test_create_closes_form_and_reloads() {
        let mut board = board();
        fill(&mut board, "Ann Lee", "ann@x.com");

        let outcome = board.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert!(!board.is_modal_open());
        assert_eq!(board.draft(), &StudentDraft::default());
        assert_eq!(board.students().len(), 1);

        let note = board.notification_at(Instant::now()).unwrap();
        assert_eq!(note.message, MSG_ADDED);
        assert_eq!(note.severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_invalid_form_is_blocked() {
        let mut board = board();
        fill(&mut board, "Ann Lee", "ann@x.com");
        board.set_field(StudentField::Contact, "12345");

        assert_eq!(board.submit().await, SubmitOutcome::Invalid);
        assert!(board.is_modal_open());
        assert_eq!(
            board.errors()[&StudentField::Contact],
            "Contact must be 10 digits"
        );
        assert_eq!(
            board.notification_at(Instant::now()).unwrap().message,
            MSG_FIX_FORM
        );

        board.set_field(StudentField::Contact, "1234567890");
        assert!(board.errors().is_empty());
    }

    #[tokio::test]
    async fn test_server_rejection_keeps_form_open() {
        let mut board = board();
        fill(&mut board, "Ann Lee", "ann@x.com");
        board.submit().await;

        fill(&mut board, "Bo Chan", "ann@x.com");
        assert_eq!(board.submit().await, SubmitOutcome::Failed);
        assert!(board.is_modal_open());
        assert_eq!(board.draft().name, "Bo Chan");

        let note = board.notification_at(Instant::now()).unwrap();
        assert_eq!(note.message, MSG_SAVE_FAILED);
        assert_eq!(note.severity, Severity::Danger);
    }

    #[tokio::test]
    async fn test_search_matches_any_field() {
        let mut board = board();
        fill(&mut board, "Ann Lee", "ann@x.com");
        board.submit().await;
        fill(&mut board, "Bo Chan", "bo@y.org");
        board.submit().await;

        board.set_search("Y.ORG");
        let visible = board.visible_students();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Bo Chan");

        board.set_search("");
        assert_eq!(board.visible_students().len(), 2);

        board.set_search("nobody");
        assert!(board.visible_students().is_empty());
    }

    #[tokio::test]
    async fn test_declined_delete_does_nothing() {
        let mut board = board();
        fill(&mut board, "Ann Lee", "ann@x.com");
        board.submit().await;
        let id = board.students()[0].id.clone();

        assert_eq!(board.delete(&id, || false).await, DeleteOutcome::Declined);
        assert_eq!(board.students().len(), 1);

        assert_eq!(board.delete(&id, || true).await, DeleteOutcome::Deleted);
        assert!(board.students().is_empty());
        assert_eq!(
            board.notification_at(Instant::now()).unwrap().message,
            MSG_DELETED
        );
    }
}
