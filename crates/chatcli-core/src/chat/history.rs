//! Input-history log backed by the conversation store.
//!
//! The interactive loop uses this to pre-populate line recall and to record
//! every accepted input line. Lines are trimmed before they are stored.
//!
//! Ordering contract: every sequence is oldest first (ascending id). A
//! readline-style consumer that appends entries in the order received ends up
//! with the most recent line on the first "up" keypress.

use futures_util::Stream;
use tracing::debug;

use chatcli_types::chat::ConversationId;
use chatcli_types::error::StoreError;

use super::repository::ConversationRepository;

/// Load/store view of the history of one conversation.
pub struct HistoryLog<'a, R: ConversationRepository> {
    repo: &'a R,
    conversation_id: ConversationId,
}

impl<'a, R: ConversationRepository> HistoryLog<'a, R> {
    pub fn new(repo: &'a R, conversation_id: ConversationId) -> Self {
        Self {
            repo,
            conversation_id,
        }
    }

    /// Lines stored against this conversation, oldest first.
    pub fn load_history_strings(&self) -> impl Stream<Item = Result<String, StoreError>> + Send + '_ {
        self.repo.list_history(self.conversation_id)
    }

    /// Lines stored against every conversation, oldest first.
    ///
    /// Used for recall so input from earlier runs stays available.
    pub fn load_all_history_strings(
        &self,
    ) -> impl Stream<Item = Result<String, StoreError>> + Send + '_ {
        self.repo.list_all_history()
    }

    /// Persist one input line against this conversation.
    pub async fn store_string(&self, line: &str) -> Result<(), StoreError> {
        self.repo.append_history(self.conversation_id, line).await?;
        debug!(conversation_id = %self.conversation_id, "History line stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures_util::TryStreamExt;

    use super::*;
    use crate::chat::memory_repo::MemoryRepository;
    use crate::chat::session::ChatSession;

    #[tokio::test]
    async fn test_store_string_trims() {
        let session = ChatSession::start(MemoryRepository::default(), None)
            .await
            .unwrap();
        let history = session.history();

        history.store_string("  hello world  ").await.unwrap();

        let lines: Vec<String> = history.load_history_strings().try_collect().await.unwrap();
        assert_eq!(lines, vec!["hello world"]);
    }

    #[tokio::test]
    async fn test_store_then_load_adds_exactly_one() {
        let session = ChatSession::start(MemoryRepository::default(), None)
            .await
            .unwrap();
        let history = session.history();
        history.store_string("ls -la").await.unwrap();

        let count = |lines: &[String]| lines.iter().filter(|l| *l == "ls -la").count();
        let before: Vec<String> = history.load_history_strings().try_collect().await.unwrap();
        history.store_string("\tls -la\n").await.unwrap();
        let after: Vec<String> = history.load_history_strings().try_collect().await.unwrap();

        assert_eq!(count(&after), count(&before) + 1);
    }

    #[tokio::test]
    async fn test_store_string_for_missing_conversation_fails() {
        let repo = MemoryRepository::default();
        let history = HistoryLog::new(&repo, ConversationId(99));

        let err = history.store_string("orphan").await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));

        let all: Vec<String> = history.load_all_history_strings().try_collect().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_load_all_spans_conversations() {
        let repo = MemoryRepository::default();

        let first = ChatSession::start(repo.clone(), None).await.unwrap();
        first.history().store_string("from the first run").await.unwrap();
        first.close().await;

        let second = ChatSession::start(repo.clone(), None).await.unwrap();
        second.history().store_string("from the second run").await.unwrap();

        let own: Vec<String> = second
            .history()
            .load_history_strings()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(own, vec!["from the second run"]);

        let history = second.history();
        let all: Vec<String> = history.load_all_history_strings().try_collect().await.unwrap();
        assert_eq!(all, vec!["from the first run", "from the second run"]);
    }
}
