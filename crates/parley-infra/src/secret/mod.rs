//! Secret provider implementations.
//!
//! - `env`: environment variable provider (read-only, highest priority)
//! - `file`: `secrets.toml` provider from the data directory
//! - `chain`: chain builder wiring providers in precedence order

pub mod chain;
pub mod env;
pub mod file;

pub use chain::build_secret_chain;
pub use env::EnvSecretProvider;
pub use file::FileSecretProvider;
