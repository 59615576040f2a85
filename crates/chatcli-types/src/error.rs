use thiserror::Error;

/// Errors surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Schema migration could not complete. The store must not be used.
    #[error("schema migration failed: {0}")]
    MigrationFailed(String),

    /// An insert violated the role CHECK, a NOT NULL column, or a foreign key.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The database file could not be opened or connected to.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("query error: {0}")]
    Query(String),
}

/// Errors related to loading a prompt seed file.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to read prompt file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("prompt '{0}' contains no lines")]
    Empty(String),
}

/// Errors from chat session construction and operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Errors from configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("database path must be absolute: '{0}'")]
    RelativeDatabasePath(String),

    #[error("config file '{path}' is unusable: {reason}")]
    InvalidConfigFile { path: String, reason: String },
}
