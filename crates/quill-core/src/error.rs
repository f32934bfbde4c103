//! Repository-level error types.
//!
//! Absence of a row is not an error anywhere in the port: lookups return
//! `Ok(None)` and delete reports whether a row existed. These variants cover
//! infrastructure failures only.

use thiserror::Error;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
