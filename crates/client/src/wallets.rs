//! Wallet list, creation, and funding.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use vaultdash_core::routing::Navigator;
use vaultdash_shared::config::StaleResponsePolicy;
use vaultdash_shared::types::{Currency, WalletId};

use crate::credentials::CredentialStore;
use crate::error::ClientError;
use crate::gateway::{ApiRequest, RequestGateway, RequestOutcome};
use crate::models::{FundingSession, Wallet, WalletsResponse};
use crate::transport::Transport;

/// Wallet collection endpoint.
pub const WALLETS_PATH: &str = "/wallets";
/// Funding endpoint.
pub const FUND_WALLET_PATH: &str = "/wallets/fund";

const FETCH_FAILED: &str = "Failed to fetch wallets. Please try again.";
const CREATE_FAILED: &str = "Failed to create wallet. Please try again.";
const FUNDING_FAILED: &str = "Failed to initiate funding. Please try again.";

#[derive(Debug, Serialize)]
struct CreateWalletRequest {
    currency: Currency,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FundWalletRequest<'a> {
    wallet_id: &'a WalletId,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

/// Currencies the user can still open a wallet in.
#[must_use]
pub fn available_currencies(held: &[Wallet]) -> Vec<Currency> {
    Currency::ALL
        .into_iter()
        .filter(|currency| held.iter().all(|wallet| wallet.currency != *currency))
        .collect()
}

/// Balance of the wallet in `currency`, if the user holds one.
#[must_use]
pub fn balance_of(wallets: &[Wallet], currency: Currency) -> Option<Decimal> {
    wallets
        .iter()
        .find(|wallet| wallet.currency == currency)
        .map(|wallet| wallet.balance)
}

/// Wallet operations.
pub struct WalletsClient {
    list_gateway: RequestGateway<WalletsResponse>,
    create_gateway: RequestGateway<Value>,
    fund_gateway: RequestGateway<FundingSession>,
    navigator: Arc<dyn Navigator>,
}

impl WalletsClient {
    /// Creates the client.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        policy: StaleResponsePolicy,
    ) -> Self {
        Self {
            list_gateway: RequestGateway::with_policy(
                Arc::clone(&transport),
                Arc::clone(&credentials),
                policy,
            ),
            create_gateway: RequestGateway::with_policy(
                Arc::clone(&transport),
                Arc::clone(&credentials),
                policy,
            ),
            fund_gateway: RequestGateway::with_policy(transport, credentials, policy),
            navigator,
        }
    }

    /// True while the wallet list is loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.list_gateway.is_busy()
    }

    /// Wallets from the last successful fetch.
    #[must_use]
    pub fn cached(&self) -> Vec<Wallet> {
        self.list_gateway
            .last_outcome()
            .filter(RequestOutcome::is_success)
            .and_then(|outcome| outcome.data)
            .map(|response| response.wallets)
            .unwrap_or_default()
    }

    /// Fetches every wallet.
    pub async fn list(&self) -> Result<Vec<Wallet>, ClientError> {
        let outcome = self.list_gateway.request(ApiRequest::get(WALLETS_PATH)).await;
        match outcome.data {
            Some(response) if (200..300).contains(&outcome.status) => Ok(response.wallets),
            _ => Err(ClientError::rejected(outcome.status, FETCH_FAILED)),
        }
    }

    /// Opens a wallet in `currency`. `held` is the last fetched wallet list.
    pub async fn create(&self, currency: Currency, held: &[Wallet]) -> Result<String, ClientError> {
        if !available_currencies(held).contains(&currency) {
            return Err(ClientError::Invalid(format!(
                "You already have a {currency} wallet"
            )));
        }

        let request = ApiRequest::post(WALLETS_PATH).json(&CreateWalletRequest { currency });
        let outcome = self.create_gateway.request(request).await;
        if !outcome.is_success() || outcome.data.is_none() {
            return Err(ClientError::rejected(outcome.status, CREATE_FAILED));
        }

        info!(%currency, "wallet created");
        Ok(format!("{currency} wallet created successfully"))
    }

    /// Starts funding `wallet` and sends the user to the payment page.
    /// Returns the payment link.
    pub async fn fund(&self, wallet: &Wallet, amount: Decimal) -> Result<String, ClientError> {
        if !wallet.is_fundable() {
            return Err(ClientError::Invalid(
                "Only NGN wallets can be funded".to_string(),
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(ClientError::Invalid(
                "Please enter a valid amount".to_string(),
            ));
        }

        let request = ApiRequest::post(FUND_WALLET_PATH).json(&FundWalletRequest {
            wallet_id: &wallet.id,
            amount,
        });
        let outcome = self.fund_gateway.request(request).await;

        let link = outcome
            .data
            .filter(|_| (200..300).contains(&outcome.status))
            .and_then(|session| session.payment_link)
            .filter(|link| !link.is_empty())
            .ok_or_else(|| ClientError::rejected(outcome.status, FUNDING_FAILED))?;

        info!(wallet_id = %wallet.id, "funding started");
        self.navigator.open_external(&link);
        Ok(link)
    }
}
