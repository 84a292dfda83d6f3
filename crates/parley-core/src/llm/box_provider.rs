//! BoxCompletionProvider -- object-safe dynamic dispatch wrapper.
//!
//! `CompletionProvider` uses RPITIT and cannot be a trait object directly.
//! The usual three-step pattern applies:
//! 1. an object-safe `CompletionProviderDyn` trait with boxed futures
//! 2. a blanket impl of `CompletionProviderDyn` for all `T: CompletionProvider`
//! 3. `BoxCompletionProvider` wrapping `Box<dyn CompletionProviderDyn>`
//!
//! The wrapper itself implements `CompletionProvider`, so code generic over
//! the trait accepts it unchanged.

use std::future::Future;
use std::pin::Pin;

use futures_util::Stream;

use parley_types::error::CompletionError;
use parley_types::llm::CompletionRequest;

use super::provider::CompletionProvider;

/// Object-safe version of [`CompletionProvider`] with boxed futures.
pub trait CompletionProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send + 'a>>;

    fn stream_boxed(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send + 'static>>;
}

impl<T: CompletionProvider> CompletionProviderDyn for T {
    fn name(&self) -> &str {
        CompletionProvider::name(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send + 'a>> {
        Box::pin(self.complete(request))
    }

    fn stream_boxed(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send + 'static>> {
        self.stream(request)
    }
}

/// Type-erased completion provider for runtime backend selection.
pub struct BoxCompletionProvider {
    inner: Box<dyn CompletionProviderDyn>,
}

impl BoxCompletionProvider {
    /// Wrap a concrete provider in a type-erased box.
    pub fn new<T: CompletionProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }
}

impl CompletionProvider for BoxCompletionProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.inner.complete_boxed(request).await
    }

    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send + 'static>> {
        self.inner.stream_boxed(request)
    }
}
