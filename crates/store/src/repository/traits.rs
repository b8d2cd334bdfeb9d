//! Repository contract for saving and loading the roster snapshot.

use indexmap::IndexMap;

use crate::record::StudentRecord;
use crate::repository::Result;

/// Full roster as one value: insertion-ordered mapping from student id to
/// record. Iteration order is the order records were added or loaded.
pub type RosterSnapshot = IndexMap<String, StudentRecord>;

/// Repository for roster snapshot persistence.
///
/// The store replaces the whole snapshot on every save (write-the-world);
/// implementations never merge or diff.
pub trait RosterRepository: Send + Sync {
    /// Load the last persisted snapshot.
    ///
    /// Returns `Ok(None)` when no snapshot has ever been persisted. A
    /// snapshot that exists but cannot be read is an `Err`; the store
    /// decides how to recover.
    fn load(&self) -> Result<Option<RosterSnapshot>>;

    /// Persist the full snapshot, replacing any previous one.
    fn save(&self, snapshot: &RosterSnapshot) -> Result<()>;
}
