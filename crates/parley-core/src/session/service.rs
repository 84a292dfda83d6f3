//! Session persistence path.
//!
//! Every write to the store goes through `SessionService`: it validates the
//! record, recomputes the display name from the first user turn, refreshes
//! the last-updated timestamp, and then delegates to the underlying store.
//! Reads and deletes pass through unchanged.

use chrono::Utc;
use parley_types::chat::Session;
use parley_types::error::StoreError;
use tracing::{debug, info};
use uuid::Uuid;

use crate::session::naming::derive_session_name;
use crate::session::store::SessionStore;

/// Applies naming and timestamp rules on the way into the store.
///
/// Generic over `SessionStore` so the core never depends on a concrete
/// backend.
pub struct SessionService<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a session, recomputing its display name and refreshing
    /// `last_updated`.
    ///
    /// The name recomputation happens on every upsert so it always reflects
    /// the first user turn present at save time. A session with no
    /// user-authored turn keeps its existing name. Returns the session as
    /// written.
    pub async fn upsert(&self, mut session: Session) -> Result<Session, StoreError> {
        if session.user_id.is_empty() {
            return Err(StoreError::InvalidSession(
                "owning user id must not be empty".to_string(),
            ));
        }

        if let Some(name) = derive_session_name(&session.turns) {
            session.session_name = name;
        }
        session.last_updated = Utc::now();

        self.store.upsert(&session).await?;
        info!(session_id = %session.id, turns = session.turns.len(), "session persisted");
        Ok(session)
    }

    pub async fn get(
        &self,
        user_id: &str,
        session_id: &Uuid,
    ) -> Result<Option<Session>, StoreError> {
        self.store.get(user_id, session_id).await
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Session>, StoreError> {
        self.store.list_for_user(user_id).await
    }

    pub async fn delete(&self, user_id: &str, session_id: &Uuid) -> Result<(), StoreError> {
        self.store.delete(user_id, session_id).await?;
        debug!(session_id = %session_id, "session deleted");
        Ok(())
    }
}
