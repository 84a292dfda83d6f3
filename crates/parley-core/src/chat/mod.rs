//! Conversation orchestration.
//!
//! The orchestrator joins a stateless chat request with the persisted
//! transcript, computes the model reply, and produces the updated transcript
//! for the caller to persist.

pub mod orchestrator;

pub use orchestrator::{ChatOrchestrator, ModelParams, DEFAULT_SYSTEM_PROMPT};
