//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PeopleError`]
//! via `From`, so use-cases only ever deal with one error type.

use std::error::Error as StdError;

/// Top-level error returned by application services and repository ports.
#[derive(Debug, thiserror::Error)]
pub enum PeopleError {
    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The storage backend failed (disk full, corruption, lost connection, …).
    #[error("storage error")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

/// A lookup by identifier matched no record.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"Person"`).
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}
