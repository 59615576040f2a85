//! Main chat loop orchestration.
//!
//! For every accepted line: record it in the history log, append it as a
//! `user` message, send the whole conversation to the provider, then append
//! and print the reply.
//!
//! The terminal stays in raw mode for the whole loop, so Ctrl+C arrives as a
//! key event rather than a signal. Input is therefore still read while the
//! provider call is in flight, and Ctrl+C or Ctrl+D abandons the call.

use std::future::Future;
use std::io::Write;

use futures_util::TryStreamExt;
use tracing::{debug, info, warn};

use chatcli_core::chat::repository::ConversationRepository;
use chatcli_core::chat::session::ChatSession;
use chatcli_core::llm::box_provider::BoxChatProvider;
use chatcli_types::chat::MessageRole;
use chatcli_types::error::SessionError;
use chatcli_types::llm::LlmError;

use super::input::{ChatInput, InputEvent};

/// Prompt shown before each input line.
pub const PROMPT: &str = ">>> ";

/// What happened to one input line.
#[derive(Debug)]
pub enum LineOutcome {
    /// Blank line; nothing was stored.
    Ignored,
    /// The provider answered and the reply was stored.
    Reply(String),
    /// The provider failed. The user message stays stored.
    ProviderFailed(LlmError),
    /// `interrupt` fired before the provider answered. The user message
    /// stays stored; no reply is.
    Interrupted,
}

/// Process one input line against the session.
///
/// The line is persisted before the provider is called. The provider call
/// is raced against `interrupt`; whichever finishes first wins.
pub async fn handle_line<R, I>(
    session: &ChatSession<R>,
    provider: &BoxChatProvider,
    line: &str,
    interrupt: I,
) -> Result<LineOutcome, SessionError>
where
    R: ConversationRepository,
    I: Future<Output = ()>,
{
    let line = line.trim();
    if line.is_empty() {
        return Ok(LineOutcome::Ignored);
    }

    session.history().store_string(line).await?;
    session.append_message(MessageRole::User, line).await?;

    let turns = session.completion_turns().await?;
    let reply = tokio::select! {
        reply = provider.complete(&turns) => reply,
        () = interrupt => return Ok(LineOutcome::Interrupted),
    };

    match reply {
        Ok(reply) => {
            session
                .append_message(MessageRole::Assistant, &reply)
                .await?;
            Ok(LineOutcome::Reply(reply))
        }
        Err(e) => Ok(LineOutcome::ProviderFailed(e)),
    }
}

/// Resolve on the next Ctrl+C or Ctrl+D. Lines typed meanwhile are dropped.
async fn next_interrupt(input: &mut ChatInput) {
    loop {
        match input.read_line().await {
            InputEvent::Eof | InputEvent::Interrupted => return,
            InputEvent::Message(line) => {
                debug!(
                    chars = line.len(),
                    "Input discarded while waiting for a reply"
                );
            }
        }
    }
}

/// Run the interactive loop until Ctrl+D or Ctrl+C.
///
/// Does not close the session; the caller owns that.
pub async fn run_chat_loop<R: ConversationRepository>(
    session: &ChatSession<R>,
    provider: &BoxChatProvider,
) -> anyhow::Result<()> {
    let (mut input, mut stdout) = ChatInput::new(PROMPT.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let recall: Vec<String> = session
        .history()
        .load_all_history_strings()
        .try_collect()
        .await?;
    info!(
        conversation_id = %session.current_conversation(),
        provider = provider.name(),
        recall = recall.len(),
        "Chat loop started"
    );
    input.load_history(recall);

    loop {
        let line = match input.read_line().await {
            InputEvent::Message(line) => line,
            InputEvent::Eof | InputEvent::Interrupted => break,
        };

        let outcome = handle_line(session, provider, &line, next_interrupt(&mut input)).await?;
        match outcome {
            LineOutcome::Ignored => {}
            LineOutcome::Interrupted => {
                info!("Interrupted while waiting for a reply");
                break;
            }
            LineOutcome::Reply(reply) => writeln!(stdout, "{reply}")?,
            LineOutcome::ProviderFailed(e) => {
                warn!(error = %e, "Chat completion failed");
                writeln!(stdout, "Error: {e}")?;
            }
        }
    }

    input.flush();
    Ok(())
}
