//! File-backed secret provider.
//!
//! Reads flat `NAME = "value"` pairs from `secrets.toml` in the data
//! directory, once at startup. A missing file is an empty provider; a
//! malformed file is an error, surfaced at startup rather than as
//! per-request misses with a misleading cause.

use std::collections::HashMap;
use std::path::Path;

use parley_core::secret::SecretProvider;
use parley_types::error::SecretError;
use tracing::debug;

pub struct FileSecretProvider {
    values: HashMap<String, String>,
}

impl std::fmt::Debug for FileSecretProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSecretProvider")
            .field("values", &format_args!("<{} redacted>", self.values.len()))
            .finish()
    }
}

impl FileSecretProvider {
    /// File name looked up inside the data directory.
    pub const FILE_NAME: &'static str = "secrets.toml";

    /// Load `{data_dir}/secrets.toml`.
    pub async fn load(data_dir: &Path) -> Result<Self, SecretError> {
        let path = data_dir.join(Self::FILE_NAME);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no secrets file, provider is empty");
                return Ok(Self {
                    values: HashMap::new(),
                });
            }
            Err(err) => {
                return Err(SecretError::Unavailable(format!(
                    "failed to read {}: {err}",
                    path.display()
                )));
            }
        };

        let table: toml::Table = content.parse().map_err(|err| {
            SecretError::Unavailable(format!("failed to parse {}: {err}", path.display()))
        })?;

        let values = table
            .into_iter()
            .filter_map(|(key, value)| match value {
                toml::Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect();

        Ok(Self { values })
    }

    #[cfg(test)]
    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl SecretProvider for FileSecretProvider {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        Ok(self.values.get(key).cloned())
    }
}
