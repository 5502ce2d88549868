//! Exchange session: quote generation followed by execute-or-reset.
//!
//! Holds at most one quote. A quote is consumed by exactly one execute
//! call: it leaves the session when the execute request is sent, and the
//! session is back in `Idle` whatever the server answers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, info, warn};
use vaultdash_core::exchange::{
    ExchangeError, ExchangeState, ExchangeStatus, ExchangeTransitions, ExecuteRequest,
    ExecuteResponse, Quote, QuoteForm, QuoteRequest, QuoteResponse,
};
use vaultdash_shared::config::StaleResponsePolicy;

use crate::credentials::CredentialStore;
use crate::gateway::{ApiRequest, RequestGateway};
use crate::models::Wallet;
use crate::transport::Transport;
use crate::wallets::balance_of;

/// Quote endpoint.
pub const QUOTE_PATH: &str = "/fx/generate-quote";
/// Execute endpoint.
pub const EXECUTE_PATH: &str = "/fx/exchange-currency";
/// Shown after a successful execute when the server sends no message.
pub const EXCHANGE_SUCCESS_MESSAGE: &str = "Currency exchanged successfully";

/// Views that must reload after balances change.
#[async_trait]
pub trait RefreshTrigger: Send + Sync {
    /// Reloads the wallet list.
    async fn refresh_wallets(&self);

    /// Reloads the FX transaction list.
    async fn refresh_fx_transactions(&self);
}

/// Client-held quote lifecycle.
pub struct ExchangeSession {
    quote_gateway: RequestGateway<QuoteResponse>,
    execute_gateway: RequestGateway<ExecuteResponse>,
    state: Mutex<ExchangeState>,
}

impl ExchangeSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        policy: StaleResponsePolicy,
    ) -> Self {
        Self {
            quote_gateway: RequestGateway::with_policy(
                Arc::clone(&transport),
                Arc::clone(&credentials),
                policy,
            ),
            execute_gateway: RequestGateway::with_policy(transport, credentials, policy),
            state: Mutex::new(ExchangeState::Idle),
        }
    }

    fn slot(&self) -> MutexGuard<'_, ExchangeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ExchangeState {
        self.slot().clone()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ExchangeStatus {
        self.slot().status()
    }

    /// Held quote, if any.
    #[must_use]
    pub fn quote(&self) -> Option<Quote> {
        self.slot().quote().cloned()
    }

    /// True while a quote or execute request is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.quote_gateway.is_busy() || self.execute_gateway.is_busy()
    }

    /// Validates `form` against the fetched `wallets` and asks the server for
    /// a quote. Nothing is sent when a precondition fails.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` while a quote is already held
    /// - `NotEnoughWallets` with fewer than two wallets
    /// - `Validation` for the first failed form precondition
    /// - `QuoteFailed` when the server does not return a quote
    pub async fn generate_quote(
        &self,
        form: &QuoteForm,
        wallets: &[Wallet],
    ) -> Result<Quote, ExchangeError> {
        ExchangeTransitions::ensure_can_quote(&self.slot())?;

        if wallets.len() < 2 {
            return Err(ExchangeError::NotEnoughWallets);
        }

        let valid = form.validate(|currency| balance_of(wallets, currency))?;

        let request = ApiRequest::post(QUOTE_PATH).json(&QuoteRequest::from(&valid));
        let outcome = self.quote_gateway.request(request).await;
        let succeeded = outcome.is_success();

        let response = match outcome.data {
            Some(response) if succeeded => response,
            _ => {
                warn!(status = outcome.status, "quote generation failed");
                return Err(ExchangeError::QuoteFailed {
                    status: outcome.status,
                });
            }
        };

        let quote = Quote::new(&valid, response);
        let mut state = self.slot();
        let next = ExchangeTransitions::quoted(&state, quote.clone())?;
        *state = next;

        info!(
            quote_reference = %quote.quote_reference,
            source = %quote.source_currency,
            target = %quote.target_currency,
            rate = %quote.exchange_rate,
            "quote generated"
        );
        Ok(quote)
    }

    /// Executes the held quote. Returns the success message.
    ///
    /// On success both refresh triggers fire exactly once. On failure the
    /// session returns to `Idle` and neither fires.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` when no quote is held
    /// - `ExecuteFailed` when the server rejects the execution
    pub async fn execute_quote(
        &self,
        refresh: &dyn RefreshTrigger,
    ) -> Result<String, ExchangeError> {
        let quote = {
            let mut state = self.slot();
            let quote = ExchangeTransitions::executable(&state)?.clone();
            *state = ExchangeTransitions::reset(&state);
            quote
        };

        let request = ApiRequest::post(EXECUTE_PATH).json(&ExecuteRequest {
            quote_reference: quote.quote_reference.clone(),
        });
        let outcome = self.execute_gateway.request(request).await;

        if !outcome.is_success() {
            warn!(
                quote_reference = %quote.quote_reference,
                status = outcome.status,
                "exchange execution failed"
            );
            return Err(ExchangeError::ExecuteFailed {
                status: outcome.status,
            });
        }

        info!(quote_reference = %quote.quote_reference, "exchange executed");
        refresh.refresh_wallets().await;
        refresh.refresh_fx_transactions().await;

        Ok(outcome
            .data
            .and_then(|response| response.message)
            .unwrap_or_else(|| EXCHANGE_SUCCESS_MESSAGE.to_string()))
    }

    /// Discards any held quote. Never sends a request.
    pub fn reset(&self) {
        let mut state = self.slot();
        if state.quote().is_some() {
            debug!("quote discarded");
        }
        *state = ExchangeTransitions::reset(&state);
    }
}
