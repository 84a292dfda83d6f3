//! Configuration loading.
//!
//! Reads `config.toml` from the data directory into [`AppConfig`]. A missing
//! file falls back to defaults; a malformed file is a hard error -- the
//! service must not start on configuration it cannot read.

use std::path::{Path, PathBuf};

use parley_types::config::AppConfig;
use parley_types::error::ConfigError;
use tracing::debug;

/// Resolve the data directory: `PARLEY_DATA_DIR`, falling back to
/// `~/.parley`.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var("PARLEY_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".parley")
        }
    }
}

/// Load `{data_dir}/config.toml`.
pub async fn load_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %config_path.display(), "no config.toml, using defaults");
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Invalid(format!(
                "failed to read {}: {err}",
                config_path.display()
            )));
        }
    };

    toml::from_str(&content).map_err(|err| {
        ConfigError::Invalid(format!("failed to parse {}: {err}", config_path.display()))
    })
}

/// Database URL for the data directory's SQLite file.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("parley.db").display())
}
