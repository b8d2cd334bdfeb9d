//! CRUD authority over the in-memory roster and its persistence cycle.

use crate::error::{Result, StoreError};
use crate::record::{StudentRecord, StudentUpdate};
use crate::repository::{RosterRepository, RosterSnapshot};

/// Single authority for student record CRUD and persistence.
///
/// Owns the insertion-ordered `id -> record` mapping and keeps it
/// synchronized with the repository: every successful mutation rewrites the
/// full snapshot (write-the-world; the dataset is small and single-writer).
/// Read operations never fail; mutating operations return the user-facing
/// success message or a [`StoreError`].
pub struct RosterStore {
    records: RosterSnapshot,
    repository: Box<dyn RosterRepository>,
}

impl RosterStore {
    /// Open a store over the given repository.
    ///
    /// A missing snapshot yields an empty roster. A snapshot that cannot be
    /// read or parsed also yields an empty roster: the condition is
    /// recoverable by reset, and the next successful mutation rewrites the
    /// file, so no error reaches the caller.
    pub fn open(repository: Box<dyn RosterRepository>) -> Self {
        let records = match repository.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => RosterSnapshot::new(),
            Err(err) => {
                tracing::warn!("discarding unreadable roster snapshot: {err}");
                RosterSnapshot::new()
            }
        };
        Self {
            records,
            repository,
        }
    }

    /// Number of records in the roster.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.values()
    }

    /// Look up a single record by exact, case-sensitive id match.
    ///
    /// Absence is a normal outcome, not an error.
    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.records.get(id)
    }

    /// Add a new record at the end of iteration order.
    ///
    /// Fails with [`StoreError::DuplicateId`] if the id already exists and
    /// with [`StoreError::EmptyField`] if any field is empty; both are
    /// checked before any mutation or I/O.
    pub fn add(&mut self, record: StudentRecord) -> Result<String> {
        if self.records.contains_key(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        validate_field("id", &record.id)?;
        validate_field("name", &record.name)?;
        validate_field("age", &record.age)?;
        validate_field("major", &record.major)?;

        let name = record.name.clone();
        let mut next = self.records.clone();
        next.insert(record.id.clone(), record);
        self.commit(next)?;

        Ok(format!("Added student: {name}"))
    }

    /// Replace the supplied fields of an existing record.
    ///
    /// `None` fields keep their stored value; the id itself is never
    /// changed. Supplying an explicit empty string fails with
    /// [`StoreError::EmptyField`].
    pub fn update(&mut self, id: &str, update: StudentUpdate) -> Result<String> {
        let Some(current) = self.records.get(id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        if let Some(name) = &update.name {
            validate_field("name", name)?;
        }
        if let Some(age) = &update.age {
            validate_field("age", age)?;
        }
        if let Some(major) = &update.major {
            validate_field("major", major)?;
        }

        let mut record = current.clone();
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(age) = update.age {
            record.age = age;
        }
        if let Some(major) = update.major {
            record.major = major;
        }

        let mut next = self.records.clone();
        // Replacing an existing key keeps its position in iteration order.
        next.insert(id.to_string(), record);
        self.commit(next)?;

        Ok("Student record updated".to_string())
    }

    /// Remove a record by id.
    ///
    /// The success message names the removed student, captured before
    /// removal. Remaining records keep their relative order.
    pub fn remove(&mut self, id: &str) -> Result<String> {
        let Some(record) = self.records.get(id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        let name = record.name.clone();

        let mut next = self.records.clone();
        next.shift_remove(id);
        self.commit(next)?;

        Ok(format!("Removed student: {name}"))
    }

    /// Persist `next` and only then make it the live mapping.
    ///
    /// A failed save leaves the previous mapping untouched, so callers
    /// never observe a mutation that did not reach the repository.
    fn commit(&mut self, next: RosterSnapshot) -> Result<()> {
        self.repository.save(&next)?;
        self.records = next;
        tracing::debug!("Persisted roster snapshot ({} records)", self.records.len());
        Ok(())
    }
}

fn validate_field(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(StoreError::EmptyField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        InMemoryRosterRepo, RepositoryError, Result as RepoResult, RosterRepository,
    };

    /// Repository whose load and/or save can be forced to fail.
    struct FlakyRepo {
        fail_load: bool,
        fail_save: bool,
    }

    impl RosterRepository for FlakyRepo {
        fn load(&self) -> RepoResult<Option<RosterSnapshot>> {
            if self.fail_load {
                return Err(RepositoryError::Json("truncated document".to_string()));
            }
            Ok(None)
        }

        fn save(&self, _snapshot: &RosterSnapshot) -> RepoResult<()> {
            if self.fail_save {
                return Err(RepositoryError::Io(std::io::Error::other("disk full")));
            }
            Ok(())
        }
    }

    fn empty_store() -> RosterStore {
        RosterStore::open(Box::new(InMemoryRosterRepo::new()))
    }

    fn alice() -> StudentRecord {
        StudentRecord::new("S001", "Alice", "20", "CS")
    }

    #[test]
    fn test_add_then_get_returns_record() {
        let mut store = empty_store();

        let message = store.add(alice()).unwrap();
        assert_eq!(message, "Added student: Alice");
        assert_eq!(store.get("S001"), Some(&alice()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_duplicate_id_rejected_without_mutation() {
        let mut store = empty_store();
        store.add(alice()).unwrap();

        let err = store
            .add(StudentRecord::new("S001", "Mallory", "99", "Art"))
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateId(id) if id == "S001"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("S001"), Some(&alice()));
    }

    #[test]
    fn test_add_empty_field_rejected_without_mutation() {
        let blanks = [
            StudentRecord::new("", "Alice", "20", "CS"),
            StudentRecord::new("S001", "", "20", "CS"),
            StudentRecord::new("S001", "Alice", "", "CS"),
            StudentRecord::new("S001", "Alice", "20", ""),
        ];

        for record in blanks {
            let mut store = empty_store();
            let err = store.add(record).unwrap_err();
            assert!(matches!(err, StoreError::EmptyField(_)));
            assert!(store.is_empty());
        }
    }

    #[test]
    fn test_whitespace_only_fields_are_accepted() {
        let mut store = empty_store();
        store
            .add(StudentRecord::new("S001", " ", "20", "CS"))
            .unwrap();
        assert_eq!(store.get("S001").unwrap().name, " ");
    }

    #[test]
    fn test_update_absent_id_is_not_found() {
        let mut store = empty_store();

        let err = store
            .update("S404", StudentUpdate::default())
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(id) if id == "S404"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_replaces_only_supplied_fields() {
        let mut store = empty_store();
        store.add(alice()).unwrap();

        let update = StudentUpdate {
            major: Some("Math".to_string()),
            ..StudentUpdate::default()
        };
        store.update("S001", update).unwrap();

        let record = store.get("S001").unwrap();
        assert_eq!(record.id, "S001");
        assert_eq!(record.name, "Alice");
        assert_eq!(record.age, "20");
        assert_eq!(record.major, "Math");
    }

    #[test]
    fn test_update_with_empty_string_rejected() {
        let mut store = empty_store();
        store.add(alice()).unwrap();

        let update = StudentUpdate {
            name: Some(String::new()),
            ..StudentUpdate::default()
        };
        let err = store.update("S001", update).unwrap_err();

        assert!(matches!(err, StoreError::EmptyField("name")));
        assert_eq!(store.get("S001"), Some(&alice()));
    }

    #[test]
    fn test_update_with_no_fields_succeeds_unchanged() {
        let mut store = empty_store();
        store.add(alice()).unwrap();

        store.update("S001", StudentUpdate::default()).unwrap();

        assert_eq!(store.get("S001"), Some(&alice()));
    }

    #[test]
    fn test_remove_then_remove_again() {
        let mut store = empty_store();
        store.add(alice()).unwrap();

        let message = store.remove("S001").unwrap();
        assert_eq!(message, "Removed student: Alice");
        assert!(store.get("S001").is_none());
        assert!(store.is_empty());

        let err = store.remove("S001").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == "S001"));
    }

    #[test]
    fn test_iteration_order_survives_removal() {
        let mut store = empty_store();
        store.add(StudentRecord::new("A", "Ann", "20", "CS")).unwrap();
        store.add(StudentRecord::new("B", "Ben", "21", "CS")).unwrap();
        store.add(StudentRecord::new("C", "Cam", "22", "CS")).unwrap();

        store.remove("B").unwrap();
        store.add(StudentRecord::new("D", "Dee", "23", "CS")).unwrap();

        let ids: Vec<&str> = store.all().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["A", "C", "D"]);
    }

    #[test]
    fn test_age_is_compared_as_text() {
        let mut store = empty_store();
        store
            .add(StudentRecord::new("S001", "Alice", "020", "CS"))
            .unwrap();

        assert_eq!(store.get("S001").unwrap().age, "020");
        assert_ne!(store.get("S001").unwrap().age, "20");
    }

    #[test]
    fn test_open_recovers_from_unreadable_snapshot() {
        let store = RosterStore::open(Box::new(FlakyRepo {
            fail_load: true,
            fail_save: false,
        }));

        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_save_leaves_mapping_unchanged() {
        let mut store = RosterStore::open(Box::new(FlakyRepo {
            fail_load: false,
            fail_save: true,
        }));

        let err = store.add(alice()).unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_reopen_from_same_repository_restores_records() {
        let repo = std::sync::Arc::new(InMemoryRosterRepo::new());

        let mut store = RosterStore::open(Box::new(SharedRepo(repo.clone())));
        store.add(alice()).unwrap();
        store.add(StudentRecord::new("S002", "Bob", "22", "Math")).unwrap();
        drop(store);

        let reopened = RosterStore::open(Box::new(SharedRepo(repo)));
        let ids: Vec<&str> = reopened.all().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["S001", "S002"]);
        assert_eq!(reopened.get("S001"), Some(&alice()));
    }

    /// Arc wrapper so two stores can share one in-memory repository.
    struct SharedRepo(std::sync::Arc<InMemoryRosterRepo>);

    impl RosterRepository for SharedRepo {
        fn load(&self) -> RepoResult<Option<RosterSnapshot>> {
            self.0.load()
        }

        fn save(&self, snapshot: &RosterSnapshot) -> RepoResult<()> {
            self.0.save(snapshot)
        }
    }
}
