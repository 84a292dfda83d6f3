//! Infrastructure layer for Parley.
//!
//! Contains implementations of the ports defined in `parley-core`: the
//! SQLite session store, the OpenAI-compatible streaming completion client,
//! secret providers, and configuration loading.

pub mod config;
pub mod llm;
pub mod secret;
pub mod sqlite;
