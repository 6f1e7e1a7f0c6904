/// Store error type
///
/// Every model operation returns `Result<_, StoreError>` instead of leaking
/// raw driver errors. Handlers get three distinguishable outcomes: the row
/// wasn't there, a constraint rejected the write, or the store itself is
/// unavailable. Callers are free to collapse these into a single user-facing
/// message, but the distinction exists at the boundary.

use thiserror::Error;

/// Outcome of a failed store operation
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested row does not exist
    #[error("record not found")]
    NotFound,

    /// A database constraint rejected the write (unique, check, foreign key)
    ///
    /// Carries the constraint name so callers can map specific conflicts
    /// (e.g. duplicate username) to their own error kinds.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The store could not be reached or failed for any other reason
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// True if this error is a unique/check violation on the named column
    pub fn violates(&self, column: &str) -> bool {
        matches!(self, StoreError::ConstraintViolation(c) if c.contains(column))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    return StoreError::ConstraintViolation(constraint.to_string());
                }
                StoreError::Unavailable(format!("database error: {}", db_err))
            }
            _ => StoreError::Unavailable(format!("database error: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn test_violates_matches_constraint_name() {
        let err = StoreError::ConstraintViolation("users_username_key".to_string());
        assert!(err.violates("username"));
        assert!(!err.violates("email"));
    }

    #[test]
    fn test_violates_is_false_for_other_kinds() {
        assert!(!StoreError::NotFound.violates("username"));
        assert!(!StoreError::Unavailable("down".to_string()).violates("username"));
    }
}
