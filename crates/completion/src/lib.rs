//! Emulated OpenAI chat completion endpoint.
//!
//! Every request gets the same placeholder reply. Only the identifier, the
//! timestamp, the echoed model name and the estimated prompt tokens change
//! between calls.

#![deny(missing_docs)]

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{Method, Uri, header},
    response::{IntoResponse, Response},
    routing::any,
};
use config::CompletionsConfig;
use messages::ChatCompletionRequest;

mod error;
mod id;
mod messages;
mod server;
mod token_counter;

pub use error::CompletionError;

use server::CompletionServer;

pub(crate) type Result<T> = std::result::Result<T, CompletionError>;

/// Creates an axum router serving the completion endpoint on the configured path.
///
/// The route accepts every HTTP method.
pub fn router(config: &CompletionsConfig) -> Router {
    let server = Arc::new(CompletionServer::new(config));

    Router::new()
        .route(&config.path, any(chat_completions))
        .layer(DefaultBodyLimit::disable())
        .with_state(server)
}

/// Handle chat completion requests.
///
/// A body that is missing, empty, or not a JSON object is logged and treated
/// as a request without fields. With `stream: true` the reply is a single
/// `chat.completion.chunk` document, otherwise a `chat.completion`. Both are
/// plain JSON responses.
async fn chat_completions(
    State(server): State<Arc<CompletionServer>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response> {
    log::debug!("Received {method} request for {}", uri.path());

    let request = decode_request(&body);

    if server.debug() {
        log::info!("Request body: {}", String::from_utf8_lossy(&body));
    }

    log::debug!("Streaming: {}", request.is_stream());

    let response = server.completions(&request);
    let json = serde_json::to_vec(&response)?;

    if server.debug() {
        log::info!("Response sent: {}", String::from_utf8_lossy(&json));
    }

    Ok(([(header::CONTENT_TYPE, "application/json")], json).into_response())
}

fn decode_request(body: &[u8]) -> ChatCompletionRequest {
    if body.is_empty() {
        return ChatCompletionRequest::default();
    }

    ChatCompletionRequest::from_slice(body).unwrap_or_else(|e| {
        log::warn!("Error decoding request body: {e}");
        ChatCompletionRequest::default()
    })
}
