//! Error taxonomy surfaced by store operations.
//!
//! Every variant's `Display` output is the user-facing feedback message;
//! presentation shells render it verbatim.

use thiserror::Error;

use crate::repository::RepositoryError;

/// Errors returned by mutating store operations.
///
/// A failed operation never leaves a partial mutation visible: validation
/// and uniqueness run before any state change, and a persistence failure
/// rolls the in-memory mapping back to its prior state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a student with id '{0}' already exists")]
    DuplicateId(String),

    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("no student found with id '{0}'")]
    NotFound(String),

    #[error("failed to persist roster: {0}")]
    Persistence(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
