//! Error types for the Cloud Director client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Cloud Director client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Entity not found
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// A lookup expected to match exactly one entity matched several
    #[error("expected exactly one entity, found several: {0}")]
    MultipleEntitiesFound(String),

    /// Caller lacks the privilege or deployment flavor the operation needs
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No API version supported by the session satisfies the endpoint
    #[error("no supported API version for endpoint {0}")]
    UnsupportedVersion(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Entity resolution was rejected by the server
    #[error("entity resolution failed: {0}")]
    ResolutionFailed(String),

    /// A tracked task ended in error or was aborted
    #[error("task failed: {0}")]
    TaskFailed(String),

    /// Gave up polling a task before it reached a terminal status
    #[error("timed out waiting for task: {0}")]
    TaskTimeout(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound(_))
            || matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}
