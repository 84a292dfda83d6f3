//! SSE stream consumption for the chat completions endpoint.
//!
//! The server sends `data:` events each holding one JSON chunk with a text
//! delta; the literal sentinel `[DONE]` terminates the stream. Chunks are
//! mapped to their text deltas in arrival order.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};

use parley_types::error::CompletionError;

use super::types::{WireChunk, WireErrorBody};

/// Sentinel the server sends when the stream is complete.
const DONE_SENTINEL: &str = "[DONE]";

/// Send a prepared streaming completion request and adapt its SSE events to
/// text chunks. The builder already carries auth headers and the JSON body.
pub fn create_completion_stream(
    request: reqwest::RequestBuilder,
) -> Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send + 'static>> {
    Box::pin(async_stream::try_stream! {
        let response = request
            .send()
            .await
            .map_err(|e| CompletionError::Provider {
                message: format!("request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .ok()
                .and_then(|text| {
                    serde_json::from_str::<WireErrorBody>(&text)
                        .map(|b| b.error.message)
                        .ok()
                        .or(Some(text))
                })
                .unwrap_or_default();
            Err(CompletionError::Provider {
                message: format!("completion request returned {status}: {detail}"),
            })?;
        } else {
            let mut events = response.bytes_stream().eventsource();
            while let Some(event) = events.next().await {
                let event = event.map_err(|e| CompletionError::Stream(e.to_string()))?;
                if event.data == DONE_SENTINEL {
                    break;
                }
                if let Some(text) = chunk_text(&event.data)? {
                    yield text;
                }
            }
        }
    })
}

/// Extract the text delta from one SSE data payload. `Ok(None)` for chunks
/// that carry no text (role headers, finish markers).
fn chunk_text(data: &str) -> Result<Option<String>, CompletionError> {
    let chunk: WireChunk = serde_json::from_str(data)
        .map_err(|e| CompletionError::InvalidResponse(format!("bad chunk: {e}")))?;

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|text| !text.is_empty()))
}
