//! Exchange error types.
//!
//! Validation errors carry the exact inline message shown next to the form.

use thiserror::Error;
use vaultdash_shared::AppError;
use vaultdash_shared::types::Currency;

use super::types::ExchangeStatus;

/// A quote precondition that failed before any request was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteValidationError {
    /// No source currency selected.
    #[error("Please select a source currency")]
    MissingSourceCurrency,

    /// No target currency selected.
    #[error("Please select a target currency")]
    MissingTargetCurrency,

    /// Source and target are the same currency.
    #[error("Source and target currencies must be different")]
    SameCurrency,

    /// Amount missing, malformed, or not positive.
    #[error("Please enter a valid amount")]
    InvalidAmount,

    /// Amount exceeds the source wallet balance.
    #[error("Insufficient {0} balance")]
    InsufficientBalance(Currency),
}

impl QuoteValidationError {
    /// Form field the message belongs next to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingSourceCurrency | Self::SameCurrency => "sourceCurrency",
            Self::MissingTargetCurrency => "targetCurrency",
            Self::InvalidAmount | Self::InsufficientBalance(_) => "amount",
        }
    }
}

/// Errors that can occur during exchange operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// A client-side precondition failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] QuoteValidationError),

    /// Exchange needs wallets in at least two currencies.
    #[error("You need at least two wallet currencies to exchange")]
    NotEnoughWallets,

    /// Attempted an operation the current state does not allow.
    #[error("Invalid exchange transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ExchangeStatus,
        /// The attempted target status.
        to: ExchangeStatus,
    },

    /// The quote request failed.
    #[error("Failed to generate exchange quote. Please try again.")]
    QuoteFailed {
        /// Status reported by the gateway.
        status: u16,
    },

    /// The execute request failed; the quote is gone.
    #[error("Failed to complete exchange. The quote may have expired.")]
    ExecuteFailed {
        /// Status reported by the gateway.
        status: u16,
    },
}

impl ExchangeError {
    /// Returns the HTTP-style status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::NotEnoughWallets => 400,
            Self::InvalidTransition { .. } => 409,
            Self::QuoteFailed { status } | Self::ExecuteFailed { status } => *status,
        }
    }

    /// Returns the error code for display layers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotEnoughWallets => "NOT_ENOUGH_WALLETS",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::QuoteFailed { .. } => "QUOTE_FAILED",
            Self::ExecuteFailed { .. } => "EXECUTE_FAILED",
        }
    }
}

impl From<ExchangeError> for AppError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::Validation(_) | ExchangeError::NotEnoughWallets => {
                Self::Validation(err.to_string())
            }
            ExchangeError::InvalidTransition { .. } => Self::InvalidState(err.to_string()),
            ExchangeError::QuoteFailed { status } | ExchangeError::ExecuteFailed { status } => {
                Self::Api {
                    status,
                    message: err.to_string(),
                }
            }
        }
    }
}
