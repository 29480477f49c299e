//! Helpers for classifying database errors by constraint.

/// Returns true if `e` is a unique violation of the named constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}

/// Returns true if `e` is a foreign-key violation of the named constraint.
pub fn is_foreign_key_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_foreign_key_violation() && db_err.constraint() == Some(constraint)
}
