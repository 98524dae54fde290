//! Translation of sqlx errors into [`AppError`] kinds.

use pawhotel_core::error::{AppError, ErrorKind};

/// SQLSTATE for an exclusion constraint violation.
const EXCLUSION_VIOLATION: &str = "23P01";
/// SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Map a sqlx error, turning constraint violations into caller-facing kinds.
///
/// Overlapping active stays and duplicate keys become `Conflict`; a
/// dangling kennel or animal reference becomes `NotFound`.
pub fn map_sqlx_error(context: &str, err: sqlx::Error) -> AppError {
    let kind = match err.as_database_error().and_then(|db| db.code()) {
        Some(code) if code == EXCLUSION_VIOLATION || code == UNIQUE_VIOLATION => {
            ErrorKind::Conflict
        }
        Some(code) if code == FOREIGN_KEY_VIOLATION => ErrorKind::NotFound,
        _ => ErrorKind::Database,
    };
    AppError::with_source(kind, format!("{context}: {err}"), err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_stay_database_kind() {
        let err = map_sqlx_error("Failed to list reservations", sqlx::Error::RowNotFound);
        assert!(err.is(ErrorKind::Database));
        assert!(err.message.starts_with("Failed to list reservations"));
    }
}
