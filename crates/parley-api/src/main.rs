//! Parley REST API entry point.
//!
//! Initializes tracing, loads configuration, wires the application state,
//! and serves the router. Configuration errors abort startup: the service
//! never serves traffic partially configured.

mod http;
mod state;

use tracing_subscriber::EnvFilter;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let (state, config) = AppState::init().await?;
    let addr = config.listen_addr().to_string();

    let router = http::router::build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "parley listening");
    axum::serve(listener, router).await?;

    Ok(())
}
