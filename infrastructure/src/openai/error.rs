//! Error types for the OpenAI adapter

use canvas_application::GatewayError;
use thiserror::Error;

/// Result type alias for OpenAI operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors that can occur when calling a chat-completions endpoint
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response contained no choices")]
    EmptyChoices,

    #[error("Response choice had no text content (finish reason: {0})")]
    NoContent(String),
}

impl From<OpenAiError> for GatewayError {
    fn from(error: OpenAiError) -> Self {
        match error {
            OpenAiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            OpenAiError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            OpenAiError::Http(e) if e.is_decode() => GatewayError::InvalidResponse(e.to_string()),
            OpenAiError::Http(e) => GatewayError::RequestFailed(e.to_string()),
            OpenAiError::Api {
                status: 401 | 403,
                message,
            } => GatewayError::AuthenticationFailed(message),
            OpenAiError::Api {
                status: 404,
                message,
            } => GatewayError::ModelNotAvailable(message),
            e @ OpenAiError::Api { .. } => GatewayError::RequestFailed(e.to_string()),
            e @ (OpenAiError::EmptyChoices | OpenAiError::NoContent(_)) => {
                GatewayError::InvalidResponse(e.to_string())
            }
        }
    }
}
