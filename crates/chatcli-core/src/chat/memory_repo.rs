//! In-process `ConversationRepository` used by the session tests.

use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use futures_util::{stream, Stream};

use chatcli_types::chat::{Conversation, ConversationId, HistoryEntry, Message, MessageRole};
use chatcli_types::error::StoreError;
use chatcli_types::llm::ChatTurn;

use super::repository::ConversationRepository;

#[derive(Default)]
struct State {
    next_id: i64,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
    history: Vec<HistoryEntry>,
    close_calls: usize,
    fail_start: bool,
    fail_seed_after: Option<usize>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn exists(&self, id: ConversationId) -> bool {
        self.conversations.iter().any(|c| c.id == id)
    }

    fn require(&self, id: ConversationId) -> Result<(), StoreError> {
        if self.exists(id) {
            Ok(())
        } else {
            Err(StoreError::ConstraintViolation(
                "FOREIGN KEY constraint failed".to_string(),
            ))
        }
    }

    fn push_message(
        &mut self,
        id: ConversationId,
        role: MessageRole,
        content: &str,
    ) -> Result<(), StoreError> {
        self.require(id)?;
        let msg_id = self.next_id();
        self.messages.push(Message {
            id: msg_id,
            created_at: Utc::now(),
            role,
            name: None,
            content: content.to_string(),
            conversation_id: id,
        });
        Ok(())
    }
}

/// Cloneable handle; clones share state so tests can inspect after close.
#[derive(Clone, Default)]
pub(crate) struct MemoryRepository {
    state: Arc<Mutex<State>>,
}

impl MemoryRepository {
    pub(crate) fn failing_start() -> Self {
        let repo = Self::default();
        repo.state.lock().unwrap().fail_start = true;
        repo
    }

    /// Seeding fails after `n` seed messages have been written.
    pub(crate) fn failing_seed_after(n: usize) -> Self {
        let repo = Self::default();
        repo.state.lock().unwrap().fail_seed_after = Some(n);
        repo
    }

    pub(crate) fn message_count(&self) -> usize {
        self.state.lock().unwrap().messages.len()
    }

    pub(crate) fn close_calls(&self) -> usize {
        self.state.lock().unwrap().close_calls
    }

    pub(crate) fn conversation_count(&self) -> usize {
        self.state.lock().unwrap().conversations.len()
    }
}

impl ConversationRepository for MemoryRepository {
    fn create_conversation(
        &self,
    ) -> impl Future<Output = Result<ConversationId, StoreError>> + Send {
        self.start_conversation(&[])
    }

    fn start_conversation(
        &self,
        seed: &[ChatTurn],
    ) -> impl Future<Output = Result<ConversationId, StoreError>> + Send {
        let mut state = self.state.lock().unwrap();
        let result = if state.fail_start {
            Err(StoreError::StoreUnavailable("disk I/O error".to_string()))
        } else {
            // Stage on a copy so a failed seed leaves nothing behind.
            let mut staged = State {
                next_id: state.next_id,
                conversations: state.conversations.clone(),
                messages: state.messages.clone(),
                ..State::default()
            };
            let id = ConversationId(staged.next_id());
            staged.conversations.push(Conversation {
                id,
                created_at: Utc::now(),
            });
            let mut seeded = Ok(());
            for (i, turn) in seed.iter().enumerate() {
                if state.fail_seed_after == Some(i) {
                    seeded = Err(StoreError::ConstraintViolation(
                        "CHECK constraint failed: message_role_check".to_string(),
                    ));
                    break;
                }
                if let Err(e) = staged.push_message(id, turn.role, &turn.content) {
                    seeded = Err(e);
                    break;
                }
            }
            seeded.map(|()| {
                state.next_id = staged.next_id;
                state.conversations = staged.conversations;
                state.messages = staged.messages;
                id
            })
        };
        drop(state);
        async move { result }
    }

    fn get_conversation(
        &self,
        id: ConversationId,
    ) -> impl Future<Output = Result<Option<Conversation>, StoreError>> + Send {
        let found = self
            .state
            .lock()
            .unwrap()
            .conversations
            .iter()
            .find(|c| c.id == id)
            .cloned();
        async move { Ok(found) }
    }

    fn delete_conversation(
        &self,
        id: ConversationId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.conversations.retain(|c| c.id != id);
        state.messages.retain(|m| m.conversation_id != id);
        state.history.retain(|h| h.conversation_id != id);
        async { Ok(()) }
    }

    fn append_message(
        &self,
        id: ConversationId,
        role: MessageRole,
        content: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        let result = self.state.lock().unwrap().push_message(id, role, content);
        async move { result }
    }

    fn list_messages(
        &self,
        id: ConversationId,
    ) -> impl Stream<Item = Result<Message, StoreError>> + Send + '_ {
        let messages: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .messages
            .iter()
            .filter(|m| m.conversation_id == id)
            .cloned()
            .map(Ok)
            .collect();
        stream::iter(messages)
    }

    fn append_history(
        &self,
        id: ConversationId,
        value: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        let mut state = self.state.lock().unwrap();
        let result = state.require(id).map(|()| {
            let entry_id = state.next_id();
            state.history.push(HistoryEntry {
                id: entry_id,
                value: value.trim().to_string(),
                created_at: Utc::now(),
                conversation_id: id,
            });
        });
        drop(state);
        async move { result }
    }

    fn list_history(
        &self,
        id: ConversationId,
    ) -> impl Stream<Item = Result<String, StoreError>> + Send + '_ {
        let values: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .history
            .iter()
            .filter(|h| h.conversation_id == id)
            .map(|h| Ok(h.value.clone()))
            .collect();
        stream::iter(values)
    }

    fn list_all_history(&self) -> impl Stream<Item = Result<String, StoreError>> + Send + '_ {
        let values: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .history
            .iter()
            .map(|h| Ok(h.value.clone()))
            .collect();
        stream::iter(values)
    }

    fn close(&self) -> impl Future<Output = ()> + Send {
        self.state.lock().unwrap().close_calls += 1;
        async {}
    }
}
