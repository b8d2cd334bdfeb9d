//! File-based RosterRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::StudentRecord;
use crate::repository::{RepositoryError, Result, RosterRepository, RosterSnapshot};

/// On-disk record shape. The student id lives in the enclosing map key,
/// so the persisted file reads as `id -> {name, age, major}`.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedRecord {
    name: String,
    age: String,
    major: String,
}

/// File-based implementation of RosterRepository.
///
/// Stores the whole roster as one pretty-printed JSON object keyed by
/// student id. Non-ASCII text is written verbatim, and key order in the
/// document follows snapshot iteration order, so the file round-trips
/// stably across load/save cycles.
///
/// # File Format
///
/// ```text
/// {
///   "S001": {
///     "name": "Alice",
///     "age": "20",
///     "major": "CS"
///   }
/// }
/// ```
pub struct FileRosterRepository {
    path: PathBuf,
}

impl FileRosterRepository {
    /// Create a repository backed by the given file path.
    ///
    /// The file itself is not created until the first save; missing parent
    /// directories are created eagerly.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }
        Ok(Self { path })
    }

    /// Path of the persisted roster file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterRepository for FileRosterRepository {
    fn load(&self) -> Result<Option<RosterSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).map_err(RepositoryError::Io)?;
        let persisted: IndexMap<String, PersistedRecord> =
            serde_json::from_str(&json).map_err(|e| RepositoryError::Json(e.to_string()))?;

        // Ids are rebuilt from the map keys, keeping the key-equals-id
        // invariant structural rather than checked.
        let snapshot = persisted
            .into_iter()
            .map(|(id, fields)| {
                let record = StudentRecord {
                    id: id.clone(),
                    name: fields.name,
                    age: fields.age,
                    major: fields.major,
                };
                (id, record)
            })
            .collect();

        tracing::info!("Loaded roster from {}", self.path.display());

        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &RosterSnapshot) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let persisted: IndexMap<&String, PersistedRecord> = snapshot
            .iter()
            .map(|(id, record)| {
                let fields = PersistedRecord {
                    name: record.name.clone(),
                    age: record.age.clone(),
                    major: record.major.clone(),
                };
                (id, fields)
            })
            .collect();

        // Write to temp file
        let json = serde_json::to_string_pretty(&persisted)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, json).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Saved roster ({} records) to {}",
            snapshot.len(),
            self.path.display()
        );

        Ok(())
    }
}
