use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors of the completion endpoint.
///
/// Malformed request bodies are not errors: they degrade to a request without
/// fields. The only failure left is encoding the reply.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The response could not be serialized to JSON.
    #[error("Error encoding response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CompletionError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CompletionError {
    fn into_response(self) -> Response {
        log::error!("{self}");

        // Callers get a plain-text body, never a JSON error object.
        (self.status_code(), "Error encoding response").into_response()
    }
}
