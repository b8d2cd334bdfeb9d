//! In-memory RosterRepository implementation for tests and ephemeral runs.

use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, RosterRepository, RosterSnapshot};

/// In-memory implementation of RosterRepository.
///
/// Holds the last saved snapshot without touching the filesystem.
pub struct InMemoryRosterRepo {
    snapshot: RwLock<Option<RosterSnapshot>>,
}

impl InMemoryRosterRepo {
    /// Create a repository with no persisted snapshot.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(None),
        }
    }

    /// Create a repository pre-seeded with a snapshot.
    pub fn with_snapshot(snapshot: RosterSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
        }
    }
}

impl Default for InMemoryRosterRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterRepository for InMemoryRosterRepo {
    fn load(&self) -> Result<Option<RosterSnapshot>> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshot.clone())
    }

    fn save(&self, snapshot: &RosterSnapshot) -> Result<()> {
        let mut slot = self
            .snapshot
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(snapshot.clone());
        Ok(())
    }
}
