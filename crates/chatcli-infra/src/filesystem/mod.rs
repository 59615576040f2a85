//! Filesystem adapters for ChatCLI.
//!
//! Data directory layout and prompt file loading. All file reads go through
//! `tokio::fs`.

use std::path::{Path, PathBuf};

use chatcli_types::error::PromptError;
use chatcli_types::prompt::Prompt;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CHATCLI_DATA_DIR";

/// File name of the conversation database inside the data directory.
pub const DATABASE_FILE: &str = "chat.db";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CHATCLI_DATA_DIR` environment variable
/// 2. Platform config directory (e.g., `~/.config/ChatCLI` on Linux)
/// 3. `.chatcli` under the current directory
///
/// The result is made absolute where possible.
pub fn resolve_data_dir() -> PathBuf {
    resolve_data_dir_from(std::env::var(DATA_DIR_ENV).ok())
}

fn resolve_data_dir_from(env_value: Option<String>) -> PathBuf {
    let dir = match env_value.filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => match dirs::config_dir() {
            Some(config) => config.join("ChatCLI"),
            None => PathBuf::from(".chatcli"),
        },
    };

    std::path::absolute(&dir).unwrap_or(dir)
}

/// Path of the conversation database inside `data_dir`.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

/// Create the data directory if it does not exist yet.
pub async fn ensure_data_dir(data_dir: &Path) -> Result<(), std::io::Error> {
    tokio::fs::create_dir_all(data_dir).await
}

/// Read and parse a prompt seed file.
///
/// The prompt is named after the file stem.
pub async fn load_prompt(path: &Path) -> Result<Prompt, PromptError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PromptError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let prompt = Prompt::parse(Prompt::name_from_path(path), &content)?;
    tracing::debug!(
        path = %path.display(),
        lines = prompt.messages.len(),
        "Prompt loaded"
    );
    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_env_value_wins() {
        let dir = tempdir().unwrap();
        let resolved = resolve_data_dir_from(Some(dir.path().display().to_string()));
        assert_eq!(resolved, dir.path());
    }

    #[test]
    fn test_relative_env_value_made_absolute() {
        let resolved = resolve_data_dir_from(Some("relative-data".to_string()));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("relative-data"));
    }

    #[test]
    fn test_empty_env_value_ignored() {
        let resolved = resolve_data_dir_from(Some(String::new()));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("ChatCLI") || resolved.ends_with(".chatcli"));
    }

    #[test]
    fn test_database_path() {
        let path = database_path(Path::new("/var/lib/chatcli"));
        assert_eq!(path, PathBuf::from("/var/lib/chatcli/chat.db"));
    }

    #[tokio::test]
    async fn test_ensure_data_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_data_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_load_prompt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("terse.txt");
        tokio::fs::write(&path, "Be terse.\n\n  Use metric units.  \n")
            .await
            .unwrap();

        let prompt = load_prompt(&path).await.unwrap();
        assert_eq!(prompt.name, "terse");
        assert_eq!(prompt.messages, vec!["Be terse.", "Use metric units."]);
    }

    #[tokio::test]
    async fn test_load_prompt_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_prompt(&dir.path().join("nope.txt")).await.unwrap_err();
        assert!(matches!(err, PromptError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_prompt_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        tokio::fs::write(&path, "\n   \n").await.unwrap();

        let err = load_prompt(&path).await.unwrap_err();
        assert!(matches!(err, PromptError::Empty(name) if name == "blank"));
    }
}
