//! Secret chain builder -- wires concrete providers in priority order.
//!
//! Lives in `parley-infra` because it assembles concrete implementations;
//! the resulting chain is handed to `SecretService` in `parley-core` via the
//! `DynSecretProvider` abstraction.

use std::sync::Arc;

use parley_core::secret::DynSecretProvider;

use crate::secret::env::EnvSecretProvider;
use crate::secret::file::FileSecretProvider;

/// Build the default secret resolution chain, ordered by precedence (first
/// match wins):
/// 1. Environment variables (if `include_env` is true)
/// 2. The `secrets.toml` file provider
pub fn build_secret_chain(
    file: FileSecretProvider,
    include_env: bool,
) -> Vec<DynSecretProvider> {
    let mut chain: Vec<DynSecretProvider> = Vec::new();

    if include_env {
        chain.push(Arc::new(EnvSecretProvider::new()));
    }
    chain.push(Arc::new(file));

    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::secret::SecretService;

    #[tokio::test]
    async fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join(FileSecretProvider::FILE_NAME),
            "PARLEY_CHAIN_TEST = \"from-file\"\n",
        )
        .await
        .unwrap();
        // SAFETY: test-only env mutation, cleaned up below.
        unsafe { std::env::set_var("PARLEY_CHAIN_TEST", "from-env") };

        let file = FileSecretProvider::load(dir.path()).await.unwrap();
        let service = SecretService::new(build_secret_chain(file, true));

        assert_eq!(
            service.get("PARLEY_CHAIN_TEST").await.unwrap(),
            Some("from-env".to_string())
        );

        unsafe { std::env::remove_var("PARLEY_CHAIN_TEST") };
    }

    #[tokio::test]
    async fn file_serves_when_env_is_excluded() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join(FileSecretProvider::FILE_NAME),
            "ONLY_IN_FILE = \"file-value\"\n",
        )
        .await
        .unwrap();

        let file = FileSecretProvider::load(dir.path()).await.unwrap();
        let service = SecretService::new(build_secret_chain(file, false));

        assert_eq!(
            service.get("ONLY_IN_FILE").await.unwrap(),
            Some("file-value".to_string())
        );
    }
}
