//! Session display-name derivation.
//!
//! The name reflects the first user-authored turn present at save time and
//! is recomputed on every upsert, not only at creation.

use parley_types::chat::Turn;

/// Derive a session's display name from its turn sequence.
///
/// Takes the first two whitespace-separated tokens of the first
/// user-authored turn, joined by a single space, with `"..."` appended when
/// the turn holds more than two tokens. Consecutive separators collapse and
/// empty tokens are discarded, so a whitespace-only message names the
/// session `""`.
///
/// Returns `None` when no user-authored turn exists; the caller leaves the
/// existing name unchanged.
pub fn derive_session_name(turns: &[Turn]) -> Option<String> {
    let first_user = turns.iter().find(|t| t.is_user_message)?;
    let words: Vec<&str> = first_user.text.split_whitespace().collect();

    let mut name = words.iter().take(2).copied().collect::<Vec<_>>().join(" ");
    if words.len() > 2 {
        name.push_str("...");
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_turn(text: &str) -> Turn {
        Turn::new(text, true)
    }

    fn model_turn(text: &str) -> Turn {
        Turn::new(text, false)
    }

    #[test]
    fn one_token_names_without_ellipsis() {
        assert_eq!(
            derive_session_name(&[user_turn("hello")]),
            Some("hello".to_string())
        );
    }

    #[test]
    fn two_tokens_join_without_ellipsis() {
        assert_eq!(
            derive_session_name(&[user_turn("hello there")]),
            Some("hello there".to_string())
        );
    }

    #[test]
    fn more_than_two_tokens_appends_ellipsis() {
        assert_eq!(
            derive_session_name(&[user_turn("hello there friend")]),
            Some("hello there...".to_string())
        );
        assert_eq!(
            derive_session_name(&[user_turn("what is the meaning of life")]),
            Some("what is...".to_string())
        );
    }

    #[test]
    fn consecutive_whitespace_collapses() {
        assert_eq!(
            derive_session_name(&[user_turn("  hello \t there   friend ")]),
            Some("hello there...".to_string())
        );
    }

    #[test]
    fn empty_text_names_empty_without_ellipsis() {
        assert_eq!(derive_session_name(&[user_turn("")]), Some(String::new()));
        assert_eq!(
            derive_session_name(&[user_turn("   \t ")]),
            Some(String::new())
        );
    }

    #[test]
    fn no_user_turn_leaves_name_alone() {
        assert_eq!(derive_session_name(&[]), None);
        assert_eq!(derive_session_name(&[model_turn("I am a reply")]), None);
    }

    #[test]
    fn skips_model_turns_when_finding_the_first_user_turn() {
        let turns = [model_turn("greetings traveler"), user_turn("fix my code")];
        assert_eq!(derive_session_name(&turns), Some("fix my".to_string()));
    }
}
