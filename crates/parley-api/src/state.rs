//! Application state wiring all services together.
//!
//! Services are generic over store/provider traits; `AppState` pins them to
//! the concrete infra implementations. Everything is constructed once at
//! startup and shared via `Arc` across request handlers -- no implicit
//! global lookup.

use std::sync::Arc;

use secrecy::SecretString;

use parley_core::chat::{ChatOrchestrator, ModelParams};
use parley_core::llm::BoxCompletionProvider;
use parley_core::secret::SecretService;
use parley_core::session::SessionService;
use parley_infra::config::{database_url, load_config, resolve_data_dir};
use parley_infra::llm::OpenAiProvider;
use parley_infra::secret::{build_secret_chain, FileSecretProvider};
use parley_infra::sqlite::{DatabasePool, SqliteSessionStore};
use parley_types::config::AppConfig;
use parley_types::error::ConfigError;

use crate::http::extractors::auth::provision_api_key;

/// Concrete type aliases pinning the service generics to infra implementations.
pub type ConcreteSessionService = SessionService<SqliteSessionStore>;
pub type ConcreteOrchestrator = ChatOrchestrator<SqliteSessionStore, BoxCompletionProvider>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ConcreteOrchestrator>,
    pub session_service: Arc<ConcreteSessionService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Full startup wiring: data dir, database, secret chain, completion
    /// provider, services.
    pub async fn init() -> anyhow::Result<(Self, AppConfig)> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        // Resolve the completion API key up front; a miss is fatal.
        let file_provider = FileSecretProvider::load(&data_dir)
            .await
            .map_err(ConfigError::from)?;
        let secrets = SecretService::new(build_secret_chain(file_provider, true));
        let api_key = secrets
            .require(&config.completion.api_key_secret)
            .await
            .map_err(ConfigError::from)?;

        let provider = BoxCompletionProvider::new(OpenAiProvider::new(
            SecretString::from(api_key),
            config.completion.base_url.clone(),
        ));

        let state = Self::from_parts(db_pool, provider, &config).await?;
        Ok((state, config))
    }

    /// Wire services onto an existing pool and provider. Also the seam
    /// tests use to substitute a scripted provider.
    pub async fn from_parts(
        db_pool: DatabasePool,
        provider: BoxCompletionProvider,
        config: &AppConfig,
    ) -> anyhow::Result<Self> {
        let orchestrator = ChatOrchestrator::new(
            SqliteSessionStore::new(db_pool.clone()),
            provider,
            ModelParams::from(&config.completion),
        );
        let session_service = SessionService::new(SqliteSessionStore::new(db_pool.clone()));

        if let (Some(key), Some(user_id)) = (
            config.auth.bootstrap_api_key.as_deref(),
            config.auth.bootstrap_user_id.as_deref(),
        ) {
            provision_api_key(&db_pool, key, user_id).await?;
            tracing::info!(user_id, "bootstrap API key provisioned");
        }

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            session_service: Arc::new(session_service),
            db_pool,
        })
    }
}
