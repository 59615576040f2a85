//! Infrastructure layer for ChatCLI.
//!
//! Implements the repository and provider traits defined in `chatcli-core`:
//! SQLite storage with embedded schema migrations, filesystem adapters for
//! the data directory and prompt files, and the OpenAI chat provider.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod session;
pub mod sqlite;
