//! Errors surfaced by the resource clients.
//!
//! Every variant's `Display` is the exact text shown to the user.

use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};
use vaultdash_shared::AppError;

use crate::credentials::CredentialError;
use crate::transport::TransportError;

/// Fallback for failures without a usable server message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again later.";

/// A user action that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Input rejected before anything was sent.
    #[error("{0}")]
    Invalid(String),

    /// The server did not accept the request.
    #[error("{message}")]
    Rejected {
        /// Gateway status (500 without a response).
        status: u16,
        /// Server message verbatim, or the action's fallback text.
        message: String,
    },

    /// The credential could not be saved or removed.
    #[error("Could not store your session. Please try again.")]
    Storage(String),
}

impl ClientError {
    /// Returns the HTTP-style status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Invalid(_) => 400,
            Self::Rejected { status, .. } => *status,
            Self::Storage(_) => 500,
        }
    }

    /// Returns the error code for display layers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "VALIDATION_ERROR",
            Self::Rejected { .. } => "REQUEST_REJECTED",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub(crate) fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Converts validator output into the message of the first failing
    /// field, taking fields in `order` (dotted paths for nested structs).
    /// Field names match regardless of snake or camel case.
    pub(crate) fn from_validation(errors: &ValidationErrors, order: &[&str]) -> Self {
        let mut found = Vec::new();
        collect(errors, "", &mut found);
        found.sort_by_key(|(field, _)| {
            let field = normalize(field);
            order
                .iter()
                .position(|candidate| normalize(candidate) == field)
                .unwrap_or(usize::MAX)
        });
        let message = found
            .into_iter()
            .next()
            .map_or_else(|| "Invalid input".to_string(), |(_, message)| message);
        Self::Invalid(message)
    }
}

impl From<CredentialError> for ClientError {
    fn from(err: CredentialError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Invalid(message) => Self::Validation(message),
            ClientError::Rejected { status: 401, message } => Self::Unauthorized(message),
            ClientError::Rejected { status, message } => Self::Api { status, message },
            ClientError::Storage(message) => Self::Storage(message),
        }
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        Self::Storage(err.to_string())
    }
}

fn normalize(field: &str) -> String {
    field
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    out.push((path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect(inner, &path, out);
                }
            }
        }
    }
}
