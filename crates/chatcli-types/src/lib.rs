//! Shared domain types for ChatCLI.
//!
//! Conversations, messages, input history, prompt seeds, configuration and
//! the error taxonomy shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod prompt;
