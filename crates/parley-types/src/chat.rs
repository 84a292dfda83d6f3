//! Chat session and turn types for Parley.
//!
//! These types model conversations between users and the language model.
//! Serde renames preserve the persisted record shape: one document per
//! session, camelCase keys, turns stored under `messages`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One message exchanged in a conversation, authored either by the end user
/// or by the model.
///
/// Turns are immutable once created: the orchestrator constructs them at
/// exchange time and they are never mutated or individually deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub message_id: Uuid,
    pub text: String,
    /// True if the end user authored this turn, false for model replies.
    pub is_user_message: bool,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a turn stamped with the current time.
    pub fn new(text: impl Into<String>, is_user_message: bool) -> Self {
        Self {
            message_id: Uuid::now_v7(),
            text: text.into(),
            is_user_message,
            timestamp: Utc::now(),
        }
    }
}

/// A named, ordered conversation owned by one user.
///
/// The turn sequence is append-only; insertion order is conversation order.
/// `id` and `user_id` are immutable after creation. `last_updated` is
/// refreshed on every persisted mutation and never moves backwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    /// Owning user id -- the partition key. All lookups are scoped to it.
    pub user_id: String,
    pub session_name: String,
    /// Ordered turn sequence, serialized under `messages`.
    #[serde(rename = "messages")]
    pub turns: Vec<Turn>,
    pub last_updated: DateTime<Utc>,
}

impl Session {
    /// Placeholder name assigned at creation; the display name is recomputed
    /// from the first user turn on every persist.
    pub const DEFAULT_NAME: &'static str = "Default Session";

    /// Construct a new session owned by `user_id` with the given turns.
    pub fn new(user_id: impl Into<String>, turns: Vec<Turn>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: user_id.into(),
            session_name: Self::DEFAULT_NAME.to_string(),
            turns,
            last_updated: Utc::now(),
        }
    }
}

/// A single chat exchange request. Transient -- never persisted.
///
/// `user_id` is assigned by the API edge from the authenticated identity and
/// overrides anything the caller supplied. `include_history` is accepted but
/// never consulted: history inclusion is driven solely by the presence of
/// `session_id`.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub session_id: Option<Uuid>,
    pub user_id: String,
    pub user_message: String,
    pub include_history: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_serializes_camel_case() {
        let turn = Turn::new("hello", true);
        let json = serde_json::to_value(&turn).unwrap();

        assert!(json.get("messageId").is_some());
        assert_eq!(json["text"], "hello");
        assert_eq!(json["isUserMessage"], true);
        assert!(json.get("timestamp").is_some());
        assert!(json.get("message_id").is_none());
    }

    #[test]
    fn session_serializes_turns_as_messages() {
        let session = Session::new("user-1", vec![Turn::new("hi", true)]);
        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["sessionName"], Session::DEFAULT_NAME);
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert!(json.get("lastUpdated").is_some());
        assert!(json.get("turns").is_none());
    }

    #[test]
    fn session_round_trips_through_json() {
        let session = Session::new(
            "user-1",
            vec![Turn::new("hi", true), Turn::new("hello!", false)],
        );
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, session.id);
        assert_eq!(back.user_id, session.user_id);
        assert_eq!(back.turns, session.turns);
    }
}
