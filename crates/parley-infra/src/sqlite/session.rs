//! SQLite session store implementation.
//!
//! Implements `SessionStore` from `parley-core` using sqlx with split
//! read/write pools. Each session is one row; the turn sequence is stored as
//! a JSON column so the record keeps the one-document-per-session shape, and
//! every query is scoped by the owning user id.

use chrono::{DateTime, Utc};
use parley_core::session::SessionStore;
use parley_types::chat::{Session, Turn};
use parley_types::error::StoreError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionStore`.
pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for SQLite-to-domain mapping.
struct SessionRow {
    id: String,
    user_id: String,
    session_name: String,
    messages: String,
    last_updated: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            session_name: row.try_get("session_name")?,
            messages: row.try_get("messages")?,
            last_updated: row.try_get("last_updated")?,
        })
    }

    fn into_session(self) -> Result<Session, StoreError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| StoreError::Query(format!("invalid session id: {e}")))?;
        let turns: Vec<Turn> = serde_json::from_str(&self.messages)
            .map_err(|e| StoreError::Query(format!("invalid messages column: {e}")))?;
        let last_updated = parse_datetime(&self.last_updated)?;

        Ok(Session {
            id,
            user_id: self.user_id,
            session_name: self.session_name,
            turns,
            last_updated,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid timestamp '{s}': {e}")))
}

/// Translate sqlx failures: pool/connection problems are transient
/// (`Unavailable`), everything else is a query error.
fn map_sqlx_err(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(e.to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}

impl SessionStore for SqliteSessionStore {
    async fn upsert(&self, session: &Session) -> Result<(), StoreError> {
        let messages = serde_json::to_string(&session.turns)
            .map_err(|e| StoreError::Query(format!("failed to encode turns: {e}")))?;

        sqlx::query(
            "INSERT INTO sessions (id, user_id, session_name, messages, last_updated)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 session_name = excluded.session_name,
                 messages = excluded.messages,
                 last_updated = excluded.last_updated",
        )
        .bind(session.id.to_string())
        .bind(&session.user_id)
        .bind(&session.session_name)
        .bind(&messages)
        .bind(session.last_updated.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_err)?;

        Ok(())
    }

    async fn get(&self, user_id: &str, session_id: &Uuid) -> Result<Option<Session>, StoreError> {
        let row = sqlx::query("SELECT * FROM sessions WHERE id = ? AND user_id = ?")
            .bind(session_id.to_string())
            .bind(user_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_err)?;

        match row {
            Some(row) => {
                let session = SessionRow::from_row(&row)
                    .map_err(map_sqlx_err)?
                    .into_session()?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Session>, StoreError> {
        let rows = sqlx::query("SELECT * FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_err)?;

        rows.iter()
            .map(|row| {
                SessionRow::from_row(row)
                    .map_err(map_sqlx_err)?
                    .into_session()
            })
            .collect()
    }

    async fn delete(&self, user_id: &str, session_id: &Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ? AND user_id = ?")
            .bind(session_id.to_string())
            .bind(user_id)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
