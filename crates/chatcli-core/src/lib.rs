//! Conversation session logic and repository trait definitions for ChatCLI.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, and the `ChatSession` aggregate that the
//! interactive loop drives. It depends only on `chatcli-types` -- never on
//! `chatcli-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
