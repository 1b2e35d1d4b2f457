//! Process-local student store

use std::sync::RwLock;

use chrono::Utc;

use super::errors::{StoreError, StoreResult};
use super::table::StudentTable;
use super::StudentStore;
use crate::schema::{NewStudent, Student, StudentPatch};

/// In-memory store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<StudentTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("Lock poisoned".to_string())
}

impl StudentStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<Student>> {
        Ok(self.table.read().map_err(poisoned)?.list())
    }

    fn insert(&self, doc: NewStudent) -> StoreResult<Student> {
        let mut table = self.table.write().map_err(poisoned)?;
        let student = table.prepare_insert(&doc, Utc::now())?;
        table.commit(student.clone());
        Ok(student)
    }

    fn update(&self, id: &str, patch: StudentPatch) -> StoreResult<Student> {
        let mut table = self.table.write().map_err(poisoned)?;
        let student = table.prepare_update(id, &patch, Utc::now())?;
        table.commit(student.clone());
        Ok(student)
    }

    fn delete(&self, id: &str) -> StoreResult<Student> {
        self.table.write().map_err(poisoned)?.remove(id)
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.table.read().map_err(poisoned)?.len())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StudentField;

    fn ann() -> NewStudent {
        NewStudent::new("Ann Lee", "ann@x.com", "1234567890", "CS")
    }

    #[test]
    fn test_insert_assigns_id_and_timestamps() {
        let store = MemoryStore::new();
        let student = store.insert(ann()).unwrap();

        assert!(!student.id.is_empty());
        assert_eq!(student.name, "Ann Lee");
        assert_eq!(student.email, "ann@x.com");
        assert_eq!(student.contact, "1234567890");
        assert_eq!(student.department, "CS");
        assert_eq!(student.created_at, student.updated_at);
    }

    #[test]
    fn test_duplicate_email_keeps_one_record() {
        let store = MemoryStore::new();
        store.insert(ann()).unwrap();

        let err = store.insert(ann()).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));

        let with_email = store
            .list()
            .unwrap()
            .into_iter()
            .filter(|s| s.email == "ann@x.com")
            .count();
        assert_eq!(with_email, 1);
    }

    #[test]
    fn test_update_missing_does_not_create() {
        let store = MemoryStore::new();
        let patch = StudentPatch::default().with(StudentField::Department, "Math");

        let err = store.update("missing", patch).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_update_refreshes_updated_at() {
        let store = MemoryStore::new();
        let student = store.insert(ann()).unwrap();

        let patch = StudentPatch::default().with(StudentField::Department, "Math");
        let updated = store.update(&student.id, patch).unwrap();

        assert_eq!(updated.department, "Math");
        assert_eq!(updated.name, student.name);
        assert_eq!(updated.created_at, student.created_at);
        assert!(updated.updated_at >= student.updated_at);
    }

    #[test]
    fn test_delete_twice_is_not_found() {
        let store = MemoryStore::new();
        let student = store.insert(ann()).unwrap();

        store.delete(&student.id).unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(matches!(
            store.delete(&student.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_count_after_creates_and_deletes() {
        let store = MemoryStore::new();
        let ids: Vec<_> = (0..5)
            .map(|i| {
                store
                    .insert(NewStudent::new(
                        "Student",
                        format!("s{i}@x.com"),
                        "1234567890",
                        "CS",
                    ))
                    .unwrap()
                    .id
            })
            .collect();

        store.delete(&ids[1]).unwrap();
        store.delete(&ids[3]).unwrap();

        assert_eq!(store.count().unwrap(), 3);
        assert_eq!(store.list().unwrap().len(), 3);
    }
}
