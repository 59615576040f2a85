//! CLI argument definitions for the `chatcli` binary.
//!
//! Uses clap derive macros. There are no subcommands: every run opens a new
//! conversation and enters the interactive loop.

pub mod chat;

use std::path::PathBuf;

use clap::Parser;

/// Chat with an OpenAI model from the terminal. Every exchange is saved.
#[derive(Parser)]
#[command(name = "chatcli", version, about, long_about = None)]
pub struct Cli {
    /// Seed the conversation from a prompt file (one message per line).
    #[arg(short, long, value_name = "FILE")]
    pub prompt: Option<PathBuf>,

    /// Never contact the API; every reply is a fixed dry-run message.
    #[arg(long)]
    pub dry_run: bool,

    /// Chat model to use (overrides config.toml).
    #[arg(short, long)]
    pub model: Option<String>,

    /// OpenAI API key.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Suppress all log output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long)]
    pub otel: bool,
}

impl Cli {
    /// Default log directives for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,chatcli=debug",
            _ => "trace",
        }
    }
}
