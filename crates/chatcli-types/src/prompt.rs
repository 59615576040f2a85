//! Prompt seeds.
//!
//! A prompt is an ordered list of text lines read from a file at startup and
//! used to pre-populate a new conversation. It is never stored itself.

use serde::{Deserialize, Serialize};

use std::path::Path;

use crate::error::PromptError;

/// An externally supplied list of seed lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// File stem of the source file (`terse.txt` -> `terse`).
    pub name: String,
    pub messages: Vec<String>,
}

impl Prompt {
    /// Build a prompt from raw file content.
    ///
    /// Every non-blank line becomes one seed message, in file order, with
    /// surrounding whitespace removed.
    pub fn parse(name: impl Into<String>, content: &str) -> Result<Self, PromptError> {
        let name = name.into();
        let messages: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if messages.is_empty() {
            return Err(PromptError::Empty(name));
        }

        Ok(Self { name, messages })
    }

    /// Derive the logical prompt name from a file path.
    pub fn name_from_path(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
