//! ChatProvider trait definition.
//!
//! The chat-completion collaborator: given the ordered conversation, return
//! the assistant's reply text. Uses RPITIT like the repository traits.

use std::future::Future;

use chatcli_types::llm::{ChatTurn, LlmError};

/// Trait for chat-completion backends (OpenAI, dry-run, ...).
///
/// Implementations live in chatcli-infra, except `DryRunProvider`.
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai", "dry-run").
    fn name(&self) -> &str;

    /// Send the whole conversation and receive the reply text.
    fn complete(
        &self,
        turns: &[ChatTurn],
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}
