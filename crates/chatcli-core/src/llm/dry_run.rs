//! Provider that never leaves the process.

use std::future::Future;

use chatcli_types::llm::{ChatTurn, LlmError};

use super::provider::ChatProvider;

/// Reply sent for every turn in dry-run mode.
pub const DRY_RUN_REPLY: &str = "I am running in dry-run mode, no messages sent to OpenAI API.";

/// Answers every request with [`DRY_RUN_REPLY`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunProvider;

impl ChatProvider for DryRunProvider {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn complete(
        &self,
        _turns: &[ChatTurn],
    ) -> impl Future<Output = Result<String, LlmError>> + Send {
        async { Ok(DRY_RUN_REPLY.to_string()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatcli_types::llm::MessageRole;

    #[tokio::test]
    async fn test_dry_run_reply_is_fixed() {
        let turns = vec![ChatTurn {
            role: MessageRole::User,
            content: "hello".to_string(),
        }];
        let reply = DryRunProvider.complete(&turns).await.unwrap();
        assert_eq!(reply, DRY_RUN_REPLY);
        assert_eq!(DryRunProvider.name(), "dry-run");
    }
}
