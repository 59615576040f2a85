//! Configuration types for ChatCLI.
//!
//! `FileConfig` mirrors the optional `config.toml` in the data directory.
//! `ChatConfig` is the resolved configuration, built once at startup and
//! passed explicitly into the store and session constructors.

use serde::{Deserialize, Serialize};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Model used when neither the config file nor the command line names one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Contents of `config.toml`. All fields have defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Never contact the provider; reply with a canned message instead.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            dry_run: false,
        }
    }
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    database_path: PathBuf,
    pub prompt_path: Option<PathBuf>,
    pub dry_run: bool,
    pub model: String,
}

impl ChatConfig {
    /// Create a configuration for the given database file.
    ///
    /// The path must be absolute.
    pub fn new(database_path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let database_path = database_path.into();
        if !database_path.is_absolute() {
            return Err(ConfigError::RelativeDatabasePath(
                database_path.display().to_string(),
            ));
        }

        Ok(Self {
            database_path,
            prompt_path: None,
            dry_run: false,
            model: default_model(),
        })
    }

    /// Apply defaults read from `config.toml`.
    pub fn with_file_config(mut self, file: FileConfig) -> Self {
        self.model = file.model;
        self.dry_run = file.dry_run;
        self
    }

    pub fn with_prompt(mut self, prompt_path: Option<PathBuf>) -> Self {
        self.prompt_path = prompt_path;
        self
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }
}
