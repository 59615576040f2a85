//! Storage engine: one SQLite database file, one connection.
//!
//! `Database::open` migrates the file to the newest schema before any other
//! access, then holds a single-connection pool with foreign-key enforcement
//! on. Callers run statements through `execute` or group several writes in a
//! `transaction`, which rolls back if dropped without `commit`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};

use chatcli_types::error::StoreError;

use super::error::map_sqlx_error;
use super::migrate;

/// A value bound to a `?` placeholder by `Database::execute`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Integer(i64),
    Text(String),
    Null,
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Connection options shared by the migrator and the pool.
///
/// Foreign keys are enforced on every connection.
pub(crate) fn connect_options(path: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(path)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5))
        .create_if_missing(true)
}

/// Handle to an open, migrated database.
///
/// Clones share the same connection.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

impl Database {
    /// Migrate the file at `path` and open it.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        migrate::apply(path).await?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_options(path))
            .await
            .map_err(|e| StoreError::StoreUnavailable(e.to_string()))?;

        info!(path = %path.display(), "Database opened");
        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a transaction on the connection.
    pub async fn transaction(&self) -> Result<Transaction<'static, Sqlite>, StoreError> {
        self.pool.begin().await.map_err(map_sqlx_error)
    }

    /// Run one statement with positional parameters and return its rows.
    ///
    /// The statement runs in its own transaction.
    pub async fn execute(
        &self,
        sql: &str,
        params: &[SqlParam],
    ) -> Result<Vec<SqliteRow>, StoreError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                SqlParam::Integer(v) => query.bind(*v),
                SqlParam::Text(s) => query.bind(s.as_str()),
                SqlParam::Null => query.bind(None::<i64>),
            };
        }

        let mut tx = self.transaction().await?;
        let rows = query.fetch_all(&mut *tx).await.map_err(map_sqlx_error)?;
        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(rows = rows.len(), "Statement executed");
        Ok(rows)
    }

    /// Close the connection. Later calls on any clone fail with
    /// `StoreUnavailable`.
    pub async fn close(&self) {
        self.pool.close().await;
        info!(path = %self.path.display(), "Database closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use sqlx::Row;

    use super::*;

    async fn open_temp() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("chat.db")).await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn test_open_creates_file_and_tables() {
        let (dir, db) = open_temp().await;
        assert!(dir.path().join("chat.db").exists());

        let rows = db
            .execute(
                "SELECT name FROM sqlite_master WHERE type = 'table' \
                 AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
                &[],
            )
            .await
            .unwrap();
        let names: Vec<String> = rows.iter().map(|r| r.get("name")).collect();
        assert_eq!(names, vec!["conversation", "history", "message"]);
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let (_dir, db) = open_temp().await;

        let rows = db.execute("PRAGMA foreign_keys", &[]).await.unwrap();
        let enabled: i64 = rows[0].get(0);
        assert_eq!(enabled, 1, "foreign keys should be enabled");
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.db");

        let db = Database::open(&path).await.unwrap();
        db.execute("INSERT INTO conversation DEFAULT VALUES", &[])
            .await
            .unwrap();
        db.close().await;

        let db = Database::open(&path).await.unwrap();
        let rows = db
            .execute("SELECT COUNT(*) AS n FROM conversation", &[])
            .await
            .unwrap();
        let n: i64 = rows[0].get("n");
        assert_eq!(n, 1);
    }

    #[tokio::test]
    async fn test_execute_rejects_unknown_role() {
        let (_dir, db) = open_temp().await;
        db.execute("INSERT INTO conversation DEFAULT VALUES", &[])
            .await
            .unwrap();

        let err = db
            .execute(
                "INSERT INTO message (role, content, conversation_id) VALUES (?, ?, ?)",
                &["moderator".into(), "hi".into(), 1.into()],
            )
            .await
            .err()
            .unwrap();
        assert!(
            matches!(err, StoreError::ConstraintViolation(_)),
            "unexpected error: {err:?}"
        );

        db.execute(
            "INSERT INTO message (role, content, conversation_id) VALUES (?, ?, ?)",
            &["user".into(), "hi".into(), 1.into()],
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_execute_rejects_null_content() {
        let (_dir, db) = open_temp().await;
        db.execute("INSERT INTO conversation DEFAULT VALUES", &[])
            .await
            .unwrap();

        let err = db
            .execute(
                "INSERT INTO message (role, content, conversation_id) VALUES (?, ?, ?)",
                &["user".into(), SqlParam::Null, 1.into()],
            )
            .await
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let (_dir, db) = open_temp().await;

        {
            let mut tx = db.transaction().await.unwrap();
            sqlx::query("INSERT INTO conversation DEFAULT VALUES")
                .execute(&mut *tx)
                .await
                .unwrap();
        }

        let rows = db
            .execute("SELECT COUNT(*) AS n FROM conversation", &[])
            .await
            .unwrap();
        let n: i64 = rows[0].get("n");
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn test_closed_database_is_unavailable() {
        let (_dir, db) = open_temp().await;
        db.close().await;
        assert!(db.is_closed());

        let err = db.execute("SELECT 1", &[]).await.err().unwrap();
        assert!(matches!(err, StoreError::StoreUnavailable(_)));
    }
}
