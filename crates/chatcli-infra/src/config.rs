//! `config.toml` in the ChatCLI data directory.
//!
//! The file is optional and only supplies run defaults (`model`, `dry_run`).
//! Command-line flags are applied on top of it by the binary, so a flag
//! always beats the file. The file never names the database; that path is
//! always `{data_dir}/chat.db`.

use std::path::Path;

use tracing::{debug, warn};

use chatcli_types::config::FileConfig;
use chatcli_types::error::ConfigError;

/// Name of the optional config file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Read `{data_dir}/config.toml`.
///
/// `Ok(None)` when there is no file. A file that exists but cannot be read
/// or does not deserialize into [`FileConfig`] is an error.
pub async fn read_file_config(data_dir: &Path) -> Result<Option<FileConfig>, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    let invalid = |reason: String| ConfigError::InvalidConfigFile {
        path: path.display().to_string(),
        reason,
    };

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(invalid(e.to_string())),
    };

    toml::from_str::<FileConfig>(&content)
        .map(Some)
        .map_err(|e| invalid(e.message().to_string()))
}

/// Run defaults for this data directory.
///
/// A broken config file must not keep the user from chatting, so any error
/// from [`read_file_config`] is logged and the built-in defaults are used.
pub async fn load_file_config(data_dir: &Path) -> FileConfig {
    match read_file_config(data_dir).await {
        Ok(Some(config)) => {
            debug!(model = %config.model, dry_run = config.dry_run, "Loaded config file");
            config
        }
        Ok(None) => {
            debug!(data_dir = %data_dir.display(), "No config file, using built-in defaults");
            FileConfig::default()
        }
        Err(e) => {
            warn!(error = %e, "Ignoring config file, using built-in defaults");
            FileConfig::default()
        }
    }
}
