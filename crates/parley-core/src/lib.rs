//! Business logic and port definitions for Parley.
//!
//! This crate defines the traits the infrastructure layer implements
//! (`SessionStore`, `CompletionProvider`, `SecretProvider`) and the logic
//! that sits on top of them: the conversation orchestrator and the session
//! persistence path. It depends only on `parley-types` -- never on
//! `parley-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod secret;
pub mod session;
