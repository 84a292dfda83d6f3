use thiserror::Error;

/// Errors from session store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Lookup miss where existence was required (delete only -- point
    /// lookups signal absence with `Ok(None)`).
    #[error("session not found")]
    NotFound,

    /// Transient persistence-layer failure (connectivity, throttling).
    /// Not retried internally; retry policy is a caller concern.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query error: {0}")]
    Query(String),

    /// The session failed validation before writing.
    #[error("invalid session: {0}")]
    InvalidSession(String),
}

/// Errors from the completion provider.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("stream error: {0}")]
    Stream(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from the conversation orchestrator.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("user message must not be empty")]
    EmptyMessage,

    /// The supplied session id does not resolve under the caller's user id.
    #[error("session not found")]
    SessionNotFound,

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from secret resolution.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret '{0}' not found")]
    NotFound(String),

    #[error("secret provider unavailable: {0}")]
    Unavailable(String),
}

/// Missing or invalid startup configuration. Fatal: the service must not
/// serve traffic partially configured.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("'{0}' is not configured")]
    Missing(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Secret(#[from] SecretError),
}
