//! sqlx error classification.

use sqlx::error::ErrorKind;

use chatcli_types::error::StoreError;

/// Map a sqlx error onto the store taxonomy.
///
/// CHECK, NOT NULL, UNIQUE and FOREIGN KEY failures become
/// `ConstraintViolation`; a closed or unreachable connection becomes
/// `StoreUnavailable`. Everything else is a query error.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::CheckViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::UniqueViolation => {
                StoreError::ConstraintViolation(db_err.message().to_string())
            }
            // SQLite reports every constraint family as "... constraint failed".
            _ if db_err.message().contains("constraint failed") => {
                StoreError::ConstraintViolation(db_err.message().to_string())
            }
            _ => StoreError::Query(err.to_string()),
        },
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            StoreError::StoreUnavailable(err.to_string())
        }
        _ => StoreError::Query(err.to_string()),
    }
}
