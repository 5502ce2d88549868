//! Currency exchange: quote generation followed by execute-or-reset.
//!
//! This module implements the client-held quote lifecycle state machine,
//! the client-side quote preconditions, and the rate display rule.
//!
//! # Modules
//!
//! - `types` - Quote, exchange state, and wire bodies
//! - `error` - Exchange-specific error types
//! - `validation` - Quote form preconditions
//! - `transitions` - State transition logic
//! - `format` - Rate display

pub mod error;
pub mod format;
pub mod transitions;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::{ExchangeError, QuoteValidationError};
pub use format::{derived_rate, format_rate, rate_label};
pub use transitions::ExchangeTransitions;
pub use types::{
    ExchangeState, ExchangeStatus, ExecuteRequest, ExecuteResponse, Quote, QuoteRequest,
    QuoteResponse,
};
pub use validation::{QuoteForm, ValidQuote};
