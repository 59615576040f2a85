//! Chat-completion provider abstractions.
//!
//! - `ChatProvider`: RPITIT trait for concrete provider implementations
//! - `BoxChatProvider`: object-safe wrapper for runtime provider selection
//! - `DryRunProvider`: canned replies, never leaves the process

pub mod box_provider;
pub mod dry_run;
pub mod provider;
