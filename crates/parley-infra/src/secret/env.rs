//! Environment variable secret provider.
//!
//! Read-only provider that resolves a secret name directly as an
//! environment variable. Highest priority in the chain: env vars override
//! every other backend.

use parley_core::secret::SecretProvider;
use parley_types::error::SecretError;

pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretProvider for EnvSecretProvider {
    fn name(&self) -> &str {
        "env"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match std::env::var(key) {
            Ok(val) => Ok(Some(val)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            // Present but not valid Unicode: treat as absent, secrets must
            // be valid strings.
            Err(std::env::VarError::NotUnicode(_)) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn existing_var_resolves() {
        // SAFETY: test-only env mutation, cleaned up below.
        unsafe { std::env::set_var("PARLEY_TEST_SECRET", "value-123") };

        let provider = EnvSecretProvider::new();
        assert_eq!(
            provider.get("PARLEY_TEST_SECRET").await.unwrap(),
            Some("value-123".to_string())
        );

        unsafe { std::env::remove_var("PARLEY_TEST_SECRET") };
    }

    #[tokio::test]
    async fn missing_var_is_none() {
        let provider = EnvSecretProvider::new();
        assert_eq!(provider.get("PARLEY_TEST_ABSENT").await.unwrap(), None);
    }
}
