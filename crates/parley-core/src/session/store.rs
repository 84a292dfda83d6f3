//! SessionStore trait definition.
//!
//! Durable per-user, per-session transcript storage. All operations are
//! scoped by the owning user id -- a session is never visible across owners.
//! Implementations live in parley-infra (e.g., `SqliteSessionStore`).

use parley_types::chat::Session;
use parley_types::error::StoreError;
use uuid::Uuid;

/// Repository trait for session persistence.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// Point lookups signal absence with `Ok(None)` so callers can distinguish
/// "not found" from "store unreachable"; only `delete` treats absence as an
/// error. Transient failures surface as `StoreError::Unavailable` and are
/// never retried here.
pub trait SessionStore: Send + Sync {
    /// Write a session keyed by its id, scoped by owner. Overwrites any
    /// existing record with the same id.
    fn upsert(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Point lookup scoped by owner.
    fn get(
        &self,
        user_id: &str,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Session>, StoreError>> + Send;

    /// All sessions owned by a user. Empty vec when the owner has none;
    /// no ordering guarantee.
    fn list_for_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, StoreError>> + Send;

    /// Delete a session. Fails with `StoreError::NotFound` when absent.
    fn delete(
        &self,
        user_id: &str,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
