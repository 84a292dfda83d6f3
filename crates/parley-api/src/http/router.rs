//! Axum router configuration with middleware.
//!
//! All chat routes live under `/api/chat` and require authentication via
//! the `AuthUser` extractor; `/health` is open. Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let chat_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/history", get(handlers::session::history))
        .route(
            "/sessions/{session_id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route("/userProfile", get(handlers::chat::user_profile));

    Router::new()
        .nest("/api/chat", chat_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
