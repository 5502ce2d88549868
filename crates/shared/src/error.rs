//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No usable bearer credential, or the server rejected it.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The server answered with a non-success status.
    #[error("Server rejected request ({status}): {message}")]
    Api {
        /// HTTP status reported by the server.
        status: u16,
        /// Message taken from the response body, or a fallback.
        message: String,
    },

    /// No response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// An operation was attempted from a state that does not allow it.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP-style status code for this error.
    ///
    /// Failures with no server response map to 500.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::InvalidState(_) => 409,
            Self::Api { status, .. } => *status,
            Self::Transport(_) | Self::Config(_) | Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns a stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Api { .. } => "API_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
