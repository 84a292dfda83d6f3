//! OpenAiProvider -- concrete [`CompletionProvider`] for OpenAI-compatible
//! chat completion APIs.
//!
//! Always requests a streamed response and assembles the text deltas into
//! one string before `complete` returns, so callers see a synchronous
//! completion call. The API key is wrapped in [`secrecy::SecretString`] and
//! is only exposed when constructing request headers.

pub mod streaming;
pub mod types;

use std::pin::Pin;
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use secrecy::{ExposeSecret, SecretString};

use parley_core::llm::CompletionProvider;
use parley_types::error::CompletionError;
use parley_types::llm::CompletionRequest;

use self::streaming::create_completion_stream;
use self::types::{WireMessage, WireRequest};

/// OpenAI-compatible completion provider.
///
/// Does NOT derive Debug so the API key can never leak through debug or
/// tracing output.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAiProvider {
    /// Request timeout covering the full streamed generation.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

    pub fn new(api_key: SecretString, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Flatten a [`CompletionRequest`] into the wire shape: the system
    /// instruction becomes a leading `system` message when present.
    fn to_wire_request(&self, request: &CompletionRequest) -> WireRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(ref system) = request.system {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(|m| WireMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        }));

        WireRequest {
            model: request.model.clone(),
            messages,
            stream: true,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let mut stream = self.stream(request.clone());
        let mut reply = String::new();
        while let Some(chunk) = stream.next().await {
            reply.push_str(&chunk?);
        }
        Ok(reply)
    }

    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send + 'static>> {
        let body = self.to_wire_request(&request);
        // Headers and body are attached here so the stream owns a fully
        // prepared request and the key never leaves this struct.
        let request = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body);
        create_completion_stream(request)
    }
}
