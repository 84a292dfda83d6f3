//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the Parley service:
//! chat sessions and turns, completion request shapes, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
