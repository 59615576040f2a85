//! Session construction against the SQLite store.

use chatcli_core::chat::session::ChatSession;
use chatcli_types::config::ChatConfig;
use chatcli_types::error::SessionError;

use crate::filesystem::load_prompt;
use crate::sqlite::conversation::SqliteConversationRepository;
use crate::sqlite::pool::Database;

/// Open the database named by `config`, load the optional prompt, and start a
/// new seeded conversation.
///
/// The schema is migrated before anything else touches the file. If the
/// prompt cannot be loaded or seeding fails, the database is closed before
/// the error is returned.
pub async fn open_session(
    config: &ChatConfig,
) -> Result<ChatSession<SqliteConversationRepository>, SessionError> {
    let db = Database::open(config.database_path()).await?;

    let prompt = match &config.prompt_path {
        Some(path) => match load_prompt(path).await {
            Ok(prompt) => Some(prompt),
            Err(e) => {
                db.close().await;
                return Err(e.into());
            }
        },
        None => None,
    };

    ChatSession::start(SqliteConversationRepository::new(db), prompt.as_ref()).await
}
