//! The per-run chat session.
//!
//! A `ChatSession` is created once per process run. Construction creates a
//! new conversation and seeds it; afterwards the session exposes the
//! append-only message log and the history log for that conversation.
//! `close` consumes the session, so it can run at most once.

use futures_util::{Stream, TryStreamExt};
use tracing::{debug, info, warn};

use chatcli_types::chat::{ConversationId, DEFAULT_SEED_MESSAGE, Message, MessageRole};
use chatcli_types::error::{SessionError, StoreError};
use chatcli_types::llm::ChatTurn;
use chatcli_types::prompt::Prompt;

use super::history::HistoryLog;
use super::repository::ConversationRepository;

/// Build the seed messages for a new conversation.
///
/// Every prompt line becomes an `assistant` message. Without a prompt the
/// conversation gets a single default `assistant` message.
pub fn seed_turns(prompt: Option<&Prompt>) -> Vec<ChatTurn> {
    // Seed lines are stored as `assistant`, not `system`. Existing databases
    // depend on this; do not change it without a schema-level decision.
    match prompt {
        Some(prompt) => prompt
            .messages
            .iter()
            .map(|line| ChatTurn {
                role: MessageRole::Assistant,
                content: line.clone(),
            })
            .collect(),
        None => vec![ChatTurn {
            role: MessageRole::Assistant,
            content: DEFAULT_SEED_MESSAGE.to_string(),
        }],
    }
}

/// An open chat session bound to one conversation.
pub struct ChatSession<R: ConversationRepository> {
    repo: R,
    current_conversation: ConversationId,
}

impl<R: ConversationRepository> ChatSession<R> {
    /// Open a session: create and seed a new conversation.
    ///
    /// On failure the repository is closed before the error is returned, so
    /// the caller never holds a half-open store.
    pub async fn start(repo: R, prompt: Option<&Prompt>) -> Result<Self, SessionError> {
        let seed = seed_turns(prompt);

        match repo.start_conversation(&seed).await {
            Ok(current_conversation) => {
                info!(
                    conversation_id = %current_conversation,
                    prompt = prompt.map(|p| p.name.as_str()),
                    seed_messages = seed.len(),
                    "Chat session opened"
                );
                Ok(Self {
                    repo,
                    current_conversation,
                })
            }
            Err(e) => {
                warn!(error = %e, "Failed to start conversation");
                repo.close().await;
                Err(e.into())
            }
        }
    }

    /// The conversation this session writes to.
    pub fn current_conversation(&self) -> ConversationId {
        self.current_conversation
    }

    /// Access the repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Append a message to the current conversation.
    pub async fn append_message(
        &self,
        role: MessageRole,
        content: &str,
    ) -> Result<(), SessionError> {
        self.repo
            .append_message(self.current_conversation, role, content)
            .await?;
        debug!(conversation_id = %self.current_conversation, %role, "Message appended");
        Ok(())
    }

    /// Messages of the current conversation in turn order.
    ///
    /// Re-queries the store on every call.
    pub fn messages(&self) -> impl Stream<Item = Result<Message, StoreError>> + Send + '_ {
        self.repo.list_messages(self.current_conversation)
    }

    /// The ordered `{role, content}` view handed to the chat provider.
    pub async fn completion_turns(&self) -> Result<Vec<ChatTurn>, SessionError> {
        let turns: Vec<ChatTurn> = self
            .messages()
            .map_ok(|msg| msg.to_turn())
            .try_collect()
            .await?;
        Ok(turns)
    }

    /// The input-history log of the current conversation.
    pub fn history(&self) -> HistoryLog<'_, R> {
        HistoryLog::new(&self.repo, self.current_conversation)
    }

    /// Release the store handle. Consumes the session.
    pub async fn close(self) {
        self.repo.close().await;
        info!(conversation_id = %self.current_conversation, "Chat session closed");
    }
}
