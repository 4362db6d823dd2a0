//! Repository error type.
//!
//! Repositories return [`RepoError`] so that storage constraint breaches
//! arrive at callers as [`CoreError::ConstraintViolation`] instead of a raw
//! driver error. The conversion from [`sqlx::Error`] does the classification,
//! so `?` on any query is enough.

use atlas_core::error::CoreError;

/// PostgreSQL SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A domain-level failure (constraint breach, domain rule, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match constraint_violation(&err) {
            Some(message) => RepoError::Core(CoreError::ConstraintViolation(message)),
            None => RepoError::Database(err),
        }
    }
}

/// Describe a unique or foreign-key violation, or `None` for other errors.
fn constraint_violation(err: &sqlx::Error) -> Option<String> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    let constraint = db_err.constraint().unwrap_or("unknown");
    match db_err.code().as_deref() {
        Some(PG_UNIQUE_VIOLATION) => Some(format!(
            "Duplicate value violates unique constraint: {constraint}"
        )),
        Some(PG_FOREIGN_KEY_VIOLATION) => Some(format!(
            "Operation violates foreign key constraint: {constraint}"
        )),
        _ => None,
    }
}
