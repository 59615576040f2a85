//! Schema migrator.
//!
//! Migrations live in the workspace `migrations/` directory and are embedded
//! at compile time. Revisions are applied in version order; sqlx records each
//! applied revision in `_sqlx_migrations`, so re-running is a no-op once the
//! schema is current.

use std::path::Path;

use sqlx::migrate::Migrator;
use sqlx::{Connection, SqliteConnection};
use tracing::{debug, info};

use chatcli_types::error::StoreError;

use super::pool::connect_options;

/// The embedded, ordered revision chain.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the database at `path` to the newest schema revision.
///
/// Uses a dedicated connection that is closed before returning. A file that
/// cannot be opened at all yields `StoreUnavailable`; any failure while
/// reading or upgrading the schema (locked, corrupt, tampered revision
/// history) yields `MigrationFailed`.
pub async fn apply(path: &Path) -> Result<(), StoreError> {
    let mut conn = SqliteConnection::connect_with(&connect_options(path))
        .await
        .map_err(classify_connect_error)?;

    let result = MIGRATOR.run(&mut conn).await;

    if let Err(e) = conn.close().await {
        debug!(error = %e, "Error closing migration connection");
    }

    result.map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

    info!(
        path = %path.display(),
        revisions = MIGRATOR.iter().count(),
        "Schema is current"
    );
    Ok(())
}

/// SQLITE_CANTOPEN, possibly extended.
const SQLITE_CANTOPEN: i64 = 14;

fn classify_connect_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Io(_) => StoreError::StoreUnavailable(err.to_string()),
        sqlx::Error::Database(db_err)
            if db_err
                .code()
                .and_then(|code| code.parse::<i64>().ok())
                .is_some_and(|code| code & 0xff == SQLITE_CANTOPEN) =>
        {
            StoreError::StoreUnavailable(err.to_string())
        }
        _ => StoreError::MigrationFailed(err.to_string()),
    }
}
