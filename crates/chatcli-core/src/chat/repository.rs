//! ConversationRepository trait definition.
//!
//! CRUD-style operations over conversations, messages, and input history.
//! Every write runs in its own transaction unless documented as composed.

use std::future::Future;

use futures_util::Stream;

use chatcli_types::chat::{Conversation, ConversationId, Message, MessageRole};
use chatcli_types::error::StoreError;
use chatcli_types::llm::ChatTurn;

/// Repository trait for conversation persistence.
///
/// Implementations live in chatcli-infra (e.g., `SqliteConversationRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// The `list_*` operations return lazy streams that query the store when
/// polled. Nothing is cached, so each call reflects the latest committed
/// state at the cost of one round-trip per call.
pub trait ConversationRepository: Send + Sync {
    /// Insert a new conversation and return its store-assigned id.
    fn create_conversation(
        &self,
    ) -> impl Future<Output = Result<ConversationId, StoreError>> + Send;

    /// Insert a new conversation together with its seed messages.
    ///
    /// Composed call: the conversation and every seed message commit in one
    /// transaction, or none of them do.
    fn start_conversation(
        &self,
        seed: &[ChatTurn],
    ) -> impl Future<Output = Result<ConversationId, StoreError>> + Send;

    /// Get a conversation by id.
    fn get_conversation(
        &self,
        id: ConversationId,
    ) -> impl Future<Output = Result<Option<Conversation>, StoreError>> + Send;

    /// Delete a conversation. Its messages and history go with it.
    fn delete_conversation(
        &self,
        id: ConversationId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Append a message.
    ///
    /// Fails with `StoreError::ConstraintViolation` if the conversation does
    /// not exist.
    fn append_message(
        &self,
        id: ConversationId,
        role: MessageRole,
        content: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Messages of a conversation, ordered by id ascending (turn order).
    fn list_messages(
        &self,
        id: ConversationId,
    ) -> impl Stream<Item = Result<Message, StoreError>> + Send + '_;

    /// Append a history line, trimmed of surrounding whitespace.
    fn append_history(
        &self,
        id: ConversationId,
        value: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// History lines of a conversation, oldest first.
    fn list_history(
        &self,
        id: ConversationId,
    ) -> impl Stream<Item = Result<String, StoreError>> + Send + '_;

    /// History lines of every conversation, oldest first.
    fn list_all_history(&self) -> impl Stream<Item = Result<String, StoreError>> + Send + '_;

    /// Release the underlying store handle.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
