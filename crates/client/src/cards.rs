//! Virtual card list, issuance, funding, and freeze toggling.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use vaultdash_shared::config::StaleResponsePolicy;
use vaultdash_shared::types::{CardId, Currency};

use crate::credentials::CredentialStore;
use crate::error::ClientError;
use crate::gateway::{ApiRequest, RequestGateway, Settled};
use crate::models::{FreezeAction, VirtualCard, VirtualCardsResponse};
use crate::transport::Transport;

/// Card collection endpoint.
pub const CARDS_PATH: &str = "/virtual-cards";

const FETCH_FAILED: &str = "Failed to fetch virtual cards. Please try again.";
const CREATE_FAILED: &str = "Failed to create virtual card";
const FUND_FAILED: &str = "Failed to fund card. Please try again later.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCardRequest<'a> {
    currency: Currency,
    brand: &'static str,
    card_pin: &'a str,
}

#[derive(Debug, Serialize)]
struct FundCardRequest {
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

/// Card PIN: exactly four digits.
fn validate_pin(pin: &str) -> Result<(), ClientError> {
    if pin.len() == 4 && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ClientError::Invalid("Card PIN must be 4 digits".to_string()))
    }
}

/// Parses the funding amount text.
fn parse_fund_amount(text: &str) -> Result<Decimal, ClientError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ClientError::Invalid("Please enter an amount".to_string()));
    }
    Decimal::from_str(text)
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
        .ok_or_else(|| ClientError::Invalid("Please enter a valid amount".to_string()))
}

fn card_path(card_id: &CardId, action: &str) -> String {
    format!("{CARDS_PATH}/{card_id}/{action}")
}

/// Virtual card operations.
pub struct VirtualCardsClient {
    list_gateway: RequestGateway<VirtualCardsResponse>,
    action_gateway: RequestGateway<Value>,
}

impl VirtualCardsClient {
    /// Creates the client.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        policy: StaleResponsePolicy,
    ) -> Self {
        Self {
            list_gateway: RequestGateway::with_policy(
                Arc::clone(&transport),
                Arc::clone(&credentials),
                policy,
            ),
            action_gateway: RequestGateway::with_policy(transport, credentials, policy),
        }
    }

    /// True while the card list is loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.list_gateway.is_busy()
    }

    /// True while an issue, fund, or freeze request is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.action_gateway.is_busy()
    }

    /// Fetches every card.
    pub async fn list(&self) -> Result<Vec<VirtualCard>, ClientError> {
        let outcome = self.list_gateway.request(ApiRequest::get(CARDS_PATH)).await;
        match outcome.data {
            Some(response) if (200..300).contains(&outcome.status) => Ok(response.virtual_cards),
            _ => Err(ClientError::rejected(outcome.status, FETCH_FAILED)),
        }
    }

    /// Issues a USD VISA card protected by `pin`. Success is a 201.
    pub async fn create(&self, pin: &str) -> Result<String, ClientError> {
        validate_pin(pin)?;

        let request = ApiRequest::post(CARDS_PATH).json(&CreateCardRequest {
            currency: Currency::Usd,
            brand: "VISA",
            card_pin: pin,
        });
        let settled = self.action_gateway.dispatch(request).await;
        if !settled.outcome.has_status(201) {
            return Err(rejection(&settled, CREATE_FAILED));
        }

        info!("virtual card created");
        Ok("Virtual card created successfully".to_string())
    }

    /// Adds `amount` (as typed) to `card`. Success is a 200.
    pub async fn fund(&self, card: &VirtualCard, amount: &str) -> Result<String, ClientError> {
        let amount = parse_fund_amount(amount)?;

        let request = ApiRequest::post(card_path(&card.card_id, "fund"))
            .json(&FundCardRequest { amount });
        let settled = self.action_gateway.dispatch(request).await;
        if !settled.outcome.has_status(200) {
            return Err(rejection(&settled, FUND_FAILED));
        }

        info!(card_id = %card.card_id, "card funded");
        Ok("Card funded successfully".to_string())
    }

    /// Freezes an active card or unfreezes a frozen one. Success is a 200.
    pub async fn toggle_freeze(&self, card: &VirtualCard) -> Result<String, ClientError> {
        let action = card.freeze_action();
        let request = ApiRequest::patch(card_path(&card.card_id, action.as_str()));
        let outcome = self.action_gateway.request(request).await;

        let (done, failed) = match action {
            FreezeAction::Freeze => (
                "Card frozen successfully",
                "Failed to freeze card. Please try again.",
            ),
            FreezeAction::Unfreeze => (
                "Card unfrozen successfully",
                "Failed to unfreeze card. Please try again.",
            ),
        };

        if !outcome.has_status(200) {
            return Err(ClientError::rejected(outcome.status, failed));
        }

        info!(card_id = %card.card_id, action = action.as_str(), "card status toggled");
        Ok(done.to_string())
    }
}

fn rejection(settled: &Settled<Value>, fallback: &str) -> ClientError {
    let message = settled
        .error_message(fallback)
        .unwrap_or_else(|| fallback.to_string());
    ClientError::rejected(settled.outcome.status, message)
}
