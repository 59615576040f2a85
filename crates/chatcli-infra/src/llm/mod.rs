//! Chat provider implementations.

pub mod openai;
