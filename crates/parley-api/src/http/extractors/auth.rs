//! Bearer-token authentication extractor.
//!
//! Extracts the API key from `Authorization: Bearer <key>`, SHA-256 hashes
//! it, and resolves the owning user in the `api_keys` table. The resolved
//! identity is the only user id the core ever sees -- body-supplied values
//! are never trusted.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};
use sqlx::Row;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated caller identity. Extracting this verifies the credential.
pub struct AuthUser {
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = extract_bearer(parts)?;
        let key_hash = hash_api_key(&api_key);

        let row = sqlx::query("SELECT id, user_id FROM api_keys WHERE key_hash = ?")
            .bind(&key_hash)
            .fetch_optional(&state.db_pool.reader)
            .await
            .map_err(|e| AppError::Internal(format!("database error: {e}")))?;

        match row {
            Some(row) => {
                // Update last_used_at (best effort, never fails the request).
                let id: String = row.get("id");
                let now = chrono::Utc::now().to_rfc3339();
                let _ = sqlx::query("UPDATE api_keys SET last_used_at = ? WHERE id = ?")
                    .bind(&now)
                    .bind(&id)
                    .execute(&state.db_pool.writer)
                    .await;

                Ok(AuthUser {
                    user_id: row.get("user_id"),
                })
            }
            None => Err(AppError::Unauthorized("unknown API key".to_string())),
        }
    }
}

/// Extract the bearer credential from the Authorization header.
fn extract_bearer(parts: &Parts) -> Result<String, AppError> {
    let auth = parts
        .headers
        .get("authorization")
        .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))?;

    let auth_str = auth
        .to_str()
        .map_err(|_| AppError::Unauthorized("invalid Authorization header encoding".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(|key| key.trim().to_string())
        .ok_or_else(|| {
            AppError::Unauthorized("Authorization header must use the Bearer scheme".to_string())
        })
}

/// Compute the SHA-256 hash of an API key (lowercase hex).
pub fn hash_api_key(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("{digest:x}")
}

/// Store (or re-point) an API key hash for a user. Used by the startup
/// bootstrap path.
pub async fn provision_api_key(
    pool: &parley_infra::sqlite::DatabasePool,
    key: &str,
    user_id: &str,
) -> Result<(), sqlx::Error> {
    let key_hash = hash_api_key(key);
    let id = uuid::Uuid::now_v7().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO api_keys (id, key_hash, user_id, created_at) VALUES (?, ?, ?, ?)
         ON CONFLICT(key_hash) DO UPDATE SET user_id = excluded.user_id",
    )
    .bind(&id)
    .bind(&key_hash)
    .bind(user_id)
    .bind(&now)
    .execute(&pool.writer)
    .await?;

    Ok(())
}
