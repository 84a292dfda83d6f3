//! Session history handlers.
//!
//! Endpoints:
//! - GET    /api/chat/history                  - all sessions for the caller
//! - GET    /api/chat/sessions/{session_id}    - one session
//! - DELETE /api/chat/sessions/{session_id}    - delete a session

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use parley_types::chat::Session;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Parse a session id path parameter, rejecting malformed ids with a 400.
fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("invalid session id: {raw}")))
}

/// GET /api/chat/history -- every session owned by the caller. A user with
/// no sessions gets an empty list, not an error.
pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Session>>>, AppError> {
    let sessions = state.session_service.list_for_user(&auth.user_id).await?;
    Ok(Json(ApiResponse::success(sessions)))
}

/// GET /api/chat/sessions/{session_id} -- point lookup, scoped to the
/// caller. A session owned by someone else is indistinguishable from a
/// missing one.
pub async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Session>>, AppError> {
    let session_id = parse_session_id(&session_id)?;

    let session = state
        .session_service
        .get(&auth.user_id, &session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found.".to_string()))?;

    Ok(Json(ApiResponse::success(session)))
}

/// DELETE /api/chat/sessions/{session_id}.
pub async fn delete_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let session_id = parse_session_id(&session_id)?;

    state
        .session_service
        .delete(&auth.user_id, &session_id)
        .await?;

    Ok(Json(ApiResponse {
        data: None,
        errors: Vec::new(),
    }))
}
