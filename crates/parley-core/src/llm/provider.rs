//! CompletionProvider trait definition.
//!
//! The black-box text-completion boundary. Providers stream partial output
//! internally and assemble it into one string before `complete` returns, so
//! the orchestrator only ever sees final text. The chunk stream stays on the
//! trait so a future design can expose partial results without touching the
//! core.

use std::pin::Pin;

use futures_util::Stream;

use parley_types::error::CompletionError;
use parley_types::llm::CompletionRequest;

/// Trait for completion backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition) for
/// `complete`; `stream` returns a boxed stream because streams need to be
/// object-safe for the `BoxCompletionProvider` wrapper.
///
/// Implementations live in parley-infra (e.g., `OpenAiProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Produce the full reply text, blocking until the streamed response is
    /// assembled. No retries happen at this boundary.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;

    /// Stream reply text chunks in arrival order.
    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send + 'static>>;
}
