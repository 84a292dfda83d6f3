//! Chat exchange and profile handlers.
//!
//! POST /api/chat/chat is the primary flow: authenticate, override the
//! caller identity, compute the reply, merge the exchange into the
//! transcript, persist, respond with the reply and session id.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use parley_types::chat::ChatRequest;
use parley_types::error::ChatError;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBody {
    /// Existing session id to continue; absent or empty starts a new one.
    #[serde(default)]
    pub session_id: Option<String>,
    pub user_message: String,
    /// Accepted for wire compatibility; not consulted (see ChatRequest).
    #[serde(default)]
    pub include_history: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatData {
    pub response: String,
    pub session_id: Uuid,
}

/// POST /api/chat/chat -- one conversation exchange.
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ChatBody>,
) -> Result<Json<ApiResponse<ChatData>>, AppError> {
    if body.user_message.is_empty() {
        return Err(AppError::Validation(
            "userMessage must not be empty".to_string(),
        ));
    }

    let session_id = match body.session_id.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<Uuid>()
                .map_err(|_| AppError::Validation("invalid sessionId format".to_string()))?,
        ),
    };

    // The authenticated identity overrides anything the caller supplied.
    let request = ChatRequest {
        session_id,
        user_id: auth.user_id,
        user_message: body.user_message,
        include_history: body.include_history,
    };

    let reply = state
        .orchestrator
        .process_turn(&request)
        .await
        .map_err(chat_flow_error)?;
    let session = state
        .orchestrator
        .merge_turn(&request, &reply)
        .await
        .map_err(chat_flow_error)?;
    let session = state
        .session_service
        .upsert(session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(ApiResponse::success(ChatData {
        response: reply,
        session_id: session.id,
    })))
}

/// Error mapping for the chat flow. A session lookup miss mid-flow is an
/// internal failure here (endpoint contract), not a 404 -- only the session
/// lookup endpoint reports 404.
fn chat_flow_error(err: ChatError) -> AppError {
    match err {
        ChatError::EmptyMessage => {
            AppError::Validation("userMessage must not be empty".to_string())
        }
        other => AppError::Internal(other.to_string()),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub user_id: String,
}

/// GET /api/chat/userProfile -- the authenticated identity.
pub async fn user_profile(auth: AuthUser) -> Json<ApiResponse<ProfileData>> {
    Json(ApiResponse::success(ProfileData {
        user_id: auth.user_id,
    }))
}
