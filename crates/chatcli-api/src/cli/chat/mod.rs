//! Interactive chat loop.
//!
//! Reads lines, records them in the history log, and exchanges them with the
//! chat provider. Entry point: `loop_runner::run_chat_loop`.

pub mod input;
pub mod loop_runner;
