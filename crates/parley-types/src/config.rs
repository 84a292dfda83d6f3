//! Service configuration types.
//!
//! Deserialized from `config.toml` in the data directory. Every field has a
//! serde default so a partial file only overrides what it names; validation
//! of required values happens in the loader, not here.

use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub listen_addr: Option<String>,
    pub completion: CompletionConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Address the HTTP server binds when none is configured.
    pub const DEFAULT_LISTEN_ADDR: &'static str = "127.0.0.1:8080";

    pub fn listen_addr(&self) -> &str {
        self.listen_addr.as_deref().unwrap_or(Self::DEFAULT_LISTEN_ADDR)
    }
}

/// Completion provider endpoint configuration.
///
/// The API key itself never lives in config -- `api_key_secret` names the
/// secret to resolve through the secret chain at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_secret: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-35-turbo".to_string(),
            api_key_secret: "OPENAI_API_KEY".to_string(),
            max_tokens: 1024,
            temperature: None,
        }
    }
}

/// Development bootstrap credentials.
///
/// When both fields are set, startup provisions one API key for the named
/// user so a fresh deployment can authenticate without manual SQL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub bootstrap_api_key: Option<String>,
    pub bootstrap_user_id: Option<String>,
}
