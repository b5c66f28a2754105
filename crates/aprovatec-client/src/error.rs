//! Backend error types.

use thiserror::Error;

/// Message used when a failed response carries none of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "Erro na requisição";

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status. The message is the
    /// body's `message` field when present.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The token was rejected or the credentials are wrong.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// A success response did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A grades call was attempted without a session token.
    #[error("not logged in, run `aprovatec login` first")]
    NotAuthenticated,
}

impl ApiError {
    /// The message a user should see for a failed response.
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } | ApiError::Unauthorized(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
