//! Observability setup for ChatCLI.

pub mod tracing_setup;
