//! Secret resolution.
//!
//! `SecretProvider` is the port a secret backend implements; `SecretService`
//! resolves names through an ordered provider chain (first match wins).
//! Concrete providers live in parley-infra.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parley_types::error::SecretError;
use tracing::debug;

/// Trait for secret backends. Resolves a named secret to its value;
/// `Ok(None)` means this backend does not hold the secret.
pub trait SecretProvider: Send + Sync {
    /// Backend name, for logging.
    fn name(&self) -> &str;

    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, SecretError>> + Send;
}

/// Object-safe version of [`SecretProvider`] with a boxed future, so
/// heterogeneous providers can share one chain.
pub trait SecretProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn get_boxed<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, SecretError>> + Send + 'a>>;
}

impl<T: SecretProvider> SecretProviderDyn for T {
    fn name(&self) -> &str {
        SecretProvider::name(self)
    }

    fn get_boxed<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, SecretError>> + Send + 'a>> {
        Box::pin(self.get(key))
    }
}

/// Shared handle to a type-erased secret provider.
pub type DynSecretProvider = Arc<dyn SecretProviderDyn>;

/// Resolves secrets through an ordered provider chain.
pub struct SecretService {
    chain: Vec<DynSecretProvider>,
}

impl SecretService {
    pub fn new(chain: Vec<DynSecretProvider>) -> Self {
        Self { chain }
    }

    /// Resolve a secret, returning the first provider's hit.
    pub async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        for provider in &self.chain {
            if let Some(value) = provider.get_boxed(key).await? {
                debug!(key, provider = provider.name(), "secret resolved");
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Resolve a secret that must exist. A miss across the whole chain is
    /// `SecretError::NotFound`.
    pub async fn require(&self, key: &str) -> Result<String, SecretError> {
        self.get(key)
            .await?
            .ok_or_else(|| SecretError::NotFound(key.to_string()))
    }
}
