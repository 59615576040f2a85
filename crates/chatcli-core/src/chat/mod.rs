//! Conversation persistence abstractions and the per-run chat session.
//!
//! `ConversationRepository` is implemented by the infrastructure layer;
//! `ChatSession` and `HistoryLog` sit on top of it.

pub mod history;
pub mod repository;
pub mod session;

#[cfg(test)]
pub(crate) mod memory_repo;
