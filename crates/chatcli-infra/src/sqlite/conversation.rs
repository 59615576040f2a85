//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `chatcli-core` on top of
//! `Database`. Raw queries with private Row structs for the domain mapping.
//! Listing operations return sqlx row streams, so nothing is read until the
//! caller polls and every call reflects the latest committed rows.

use chrono::{DateTime, NaiveDateTime, Utc};
use futures_util::{Stream, StreamExt};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

use chatcli_core::chat::repository::ConversationRepository;
use chatcli_types::chat::{Conversation, ConversationId, Message, MessageRole};
use chatcli_types::error::StoreError;
use chatcli_types::llm::ChatTurn;

use super::error::map_sqlx_error;
use super::pool::Database;

/// Format SQLite's `CURRENT_TIMESTAMP` writes, always UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// SQLite-backed implementation of `ConversationRepository`.
#[derive(Clone)]
pub struct SqliteConversationRepository {
    db: Database,
}

impl SqliteConversationRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ConversationRow {
    id: i64,
    created_at: String,
}

impl ConversationRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_conversation(self) -> Result<Conversation, StoreError> {
        Ok(Conversation {
            id: ConversationId(self.id),
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

struct MessageRow {
    id: i64,
    created_at: String,
    role: String,
    name: Option<String>,
    content: String,
    conversation_id: i64,
}

impl MessageRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            role: row.try_get("role")?,
            name: row.try_get("name")?,
            content: row.try_get("content")?,
            conversation_id: row.try_get("conversation_id")?,
        })
    }

    fn into_message(self) -> Result<Message, StoreError> {
        let role: MessageRole = self.role.parse().map_err(StoreError::Query)?;

        Ok(Message {
            id: self.id,
            created_at: parse_timestamp(&self.created_at)?,
            role,
            name: self.name,
            content: self.content,
            conversation_id: ConversationId(self.conversation_id),
        })
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Query(format!("invalid timestamp '{s}': {e}")))
}

fn message_from_row(row: Result<SqliteRow, sqlx::Error>) -> Result<Message, StoreError> {
    let row = row.map_err(map_sqlx_error)?;
    MessageRow::from_row(&row)
        .map_err(|e| StoreError::Query(e.to_string()))?
        .into_message()
}

fn value_from_row(row: Result<SqliteRow, sqlx::Error>) -> Result<String, StoreError> {
    row.map_err(map_sqlx_error)?
        .try_get("value")
        .map_err(|e| StoreError::Query(e.to_string()))
}

async fn insert_conversation(conn: &mut SqliteConnection) -> Result<ConversationId, StoreError> {
    let result = sqlx::query("INSERT INTO conversation DEFAULT VALUES")
        .execute(conn)
        .await
        .map_err(map_sqlx_error)?;
    Ok(ConversationId(result.last_insert_rowid()))
}

async fn insert_message(
    conn: &mut SqliteConnection,
    id: ConversationId,
    role: MessageRole,
    content: &str,
) -> Result<i64, StoreError> {
    let result =
        sqlx::query("INSERT INTO message (role, content, conversation_id) VALUES (?, ?, ?)")
            .bind(role.as_str())
            .bind(content)
            .bind(id.0)
            .execute(conn)
            .await
            .map_err(map_sqlx_error)?;
    Ok(result.last_insert_rowid())
}

impl ConversationRepository for SqliteConversationRepository {
    async fn create_conversation(&self) -> Result<ConversationId, StoreError> {
        let mut tx = self.db.transaction().await?;
        let id = insert_conversation(&mut tx).await?;
        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(conversation_id = %id, "Conversation created");
        Ok(id)
    }

    async fn start_conversation(&self, seed: &[ChatTurn]) -> Result<ConversationId, StoreError> {
        let mut tx = self.db.transaction().await?;
        let id = insert_conversation(&mut tx).await?;
        for turn in seed {
            insert_message(&mut tx, id, turn.role, &turn.content).await?;
        }
        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(conversation_id = %id, seed_messages = seed.len(), "Conversation started");
        Ok(id)
    }

    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, StoreError> {
        let row = sqlx::query("SELECT id, created_at FROM conversation WHERE id = ?")
            .bind(id.0)
            .fetch_optional(self.db.pool())
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(r) => {
                let conv_row = ConversationRow::from_row(&r)
                    .map_err(|e| StoreError::Query(e.to_string()))?;
                Ok(Some(conv_row.into_conversation()?))
            }
            None => Ok(None),
        }
    }

    async fn delete_conversation(&self, id: ConversationId) -> Result<(), StoreError> {
        let mut tx = self.db.transaction().await?;
        let result = sqlx::query("DELETE FROM conversation WHERE id = ?")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(
            conversation_id = %id,
            deleted = result.rows_affected(),
            "Conversation deleted"
        );
        Ok(())
    }

    async fn append_message(
        &self,
        id: ConversationId,
        role: MessageRole,
        content: &str,
    ) -> Result<(), StoreError> {
        let mut tx = self.db.transaction().await?;
        let message_id = insert_message(&mut tx, id, role, content).await?;
        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(conversation_id = %id, message_id, %role, "Message stored");
        Ok(())
    }

    fn list_messages(
        &self,
        id: ConversationId,
    ) -> impl Stream<Item = Result<Message, StoreError>> + Send + '_ {
        sqlx::query(
            "SELECT id, created_at, role, name, content, conversation_id
             FROM message WHERE conversation_id = ? ORDER BY id ASC",
        )
        .bind(id.0)
        .fetch(self.db.pool())
        .map(message_from_row)
    }

    async fn append_history(&self, id: ConversationId, value: &str) -> Result<(), StoreError> {
        let mut tx = self.db.transaction().await?;
        sqlx::query("INSERT INTO history (value, conversation_id) VALUES (?, ?)")
            .bind(value.trim())
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    fn list_history(
        &self,
        id: ConversationId,
    ) -> impl Stream<Item = Result<String, StoreError>> + Send + '_ {
        sqlx::query("SELECT value FROM history WHERE conversation_id = ? ORDER BY id ASC")
            .bind(id.0)
            .fetch(self.db.pool())
            .map(value_from_row)
    }

    fn list_all_history(&self) -> impl Stream<Item = Result<String, StoreError>> + Send + '_ {
        sqlx::query("SELECT value FROM history ORDER BY id ASC")
            .fetch(self.db.pool())
            .map(value_from_row)
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
