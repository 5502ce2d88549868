//! Exchange state transitions.
//!
//! Stateless checks that validate a transition before any request is sent,
//! so an invalid call fails loudly instead of silently doing nothing.

use super::error::ExchangeError;
use super::types::{ExchangeState, ExchangeStatus, Quote};

/// Stateless service for exchange state transitions.
pub struct ExchangeTransitions;

impl ExchangeTransitions {
    /// Checks that a quote may be requested.
    ///
    /// # Returns
    /// * `Ok(())` in `Idle`
    /// * `Err(ExchangeError::InvalidTransition)` while a quote is held
    pub fn ensure_can_quote(current: &ExchangeState) -> Result<(), ExchangeError> {
        match current {
            ExchangeState::Idle => Ok(()),
            ExchangeState::Quoted(_) => Err(ExchangeError::InvalidTransition {
                from: ExchangeStatus::Quoted,
                to: ExchangeStatus::Quoted,
            }),
        }
    }

    /// Stores a freshly generated quote.
    ///
    /// # Returns
    /// * `Ok(ExchangeState::Quoted)` from `Idle`
    /// * `Err(ExchangeError::InvalidTransition)` while a quote is held
    pub fn quoted(current: &ExchangeState, quote: Quote) -> Result<ExchangeState, ExchangeError> {
        Self::ensure_can_quote(current)?;
        Ok(ExchangeState::Quoted(quote))
    }

    /// Returns the quote to execute.
    ///
    /// # Returns
    /// * `Ok(&Quote)` in `Quoted`
    /// * `Err(ExchangeError::InvalidTransition)` in `Idle`
    pub fn executable(current: &ExchangeState) -> Result<&Quote, ExchangeError> {
        match current {
            ExchangeState::Quoted(quote) => Ok(quote),
            ExchangeState::Idle => Err(ExchangeError::InvalidTransition {
                from: ExchangeStatus::Idle,
                to: ExchangeStatus::Idle,
            }),
        }
    }

    /// Discards any held quote. Never sends a request.
    #[must_use]
    pub fn reset(_current: &ExchangeState) -> ExchangeState {
        ExchangeState::Idle
    }
}
