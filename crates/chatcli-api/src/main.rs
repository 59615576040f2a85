//! ChatCLI entry point.
//!
//! Binary name: `chatcli`
//!
//! Parses arguments, resolves configuration, opens a new chat session against
//! the local database, and runs the interactive loop.

mod cli;

use anyhow::Context;
use clap::Parser;
use secrecy::SecretString;
use tracing::info;

use chatcli_core::llm::box_provider::BoxChatProvider;
use chatcli_core::llm::dry_run::DryRunProvider;
use chatcli_infra::config::load_file_config;
use chatcli_infra::filesystem::{database_path, ensure_data_dir, resolve_data_dir};
use chatcli_infra::llm::openai::OpenAiProvider;
use chatcli_infra::session::open_session;
use chatcli_observe::tracing_setup::{init_tracing, shutdown_tracing};
use chatcli_types::config::ChatConfig;

use cli::Cli;
use cli::chat::loop_runner::run_chat_loop;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = resolve_data_dir();
    ensure_data_dir(&data_dir)
        .await
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    let mut config = ChatConfig::new(database_path(&data_dir))?
        .with_file_config(load_file_config(&data_dir).await)
        .with_prompt(cli.prompt);
    if cli.dry_run {
        config.dry_run = true;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    let provider = create_provider(&config, cli.api_key)?;
    info!(
        data_dir = %data_dir.display(),
        model = %config.model,
        provider = provider.name(),
        "Configuration resolved"
    );

    let session = open_session(&config)
        .await
        .context("Failed to open chat session")?;

    let result = run_chat_loop(&session, &provider).await;
    session.close().await;
    result
}

/// Pick the provider: dry-run never needs a key.
fn create_provider(config: &ChatConfig, api_key: Option<String>) -> anyhow::Result<BoxChatProvider> {
    if config.dry_run {
        return Ok(BoxChatProvider::new(DryRunProvider));
    }

    let api_key = api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
        anyhow::anyhow!("OPENAI_API_KEY is not set. Export it or pass --dry-run")
    })?;
    let api_key = SecretString::from(api_key);
    Ok(BoxChatProvider::new(OpenAiProvider::new(&api_key, &config.model)))
}
