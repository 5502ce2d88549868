//! Wire models returned by the API.
//!
//! Amounts deserialize from JSON numbers or strings into `Decimal`.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vaultdash_core::exchange::{derived_rate, rate_label};
use vaultdash_shared::types::{CardId, Currency, PageWindow, UserId, WalletId};

/// Postal address of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Country.
    pub country: String,
    /// Postal code.
    pub zip_code: String,
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server id.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth as sent by the server (`YYYY-MM-DD`).
    #[serde(default)]
    pub date_of_birth: String,
    /// Email address.
    pub email: String,
    /// Phone number in international format.
    #[serde(default)]
    pub phone_number: String,
    /// Postal address.
    #[serde(default)]
    pub address: Address,
    /// Account creation instant.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update instant.
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body of `GET /users/me`. Only a present `user` counts as an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MeResponse {
    /// The resolved user.
    #[serde(default)]
    pub user: Option<User>,
}

/// A single-currency balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Server id.
    #[serde(rename = "_id")]
    pub id: WalletId,
    /// Wallet currency.
    pub currency: Currency,
    /// Available balance.
    pub balance: Decimal,
}

impl Wallet {
    /// Only NGN wallets can be funded through the payment provider.
    #[must_use]
    pub fn is_fundable(&self) -> bool {
        self.currency == Currency::Ngn
    }
}

/// Body of `GET /wallets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WalletsResponse {
    /// Every wallet the user holds.
    #[serde(default)]
    pub wallets: Vec<Wallet>,
}

/// Body of `POST /wallets/fund`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSession {
    /// External checkout page.
    #[serde(default)]
    pub payment_link: Option<String>,
    /// Deposit created for this funding attempt.
    #[serde(default)]
    pub deposit_id: Option<String>,
}

/// Server-side transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    /// Awaiting settlement.
    Pending,
    /// Settled.
    Completed,
    /// Card authorization approved.
    Approved,
    /// Settlement failed.
    Failed,
    /// Card authorization declined.
    Declined,
    /// Any status this client does not know.
    #[serde(other)]
    Unknown,
}

/// Coarse status shown as a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusGroup {
    /// Completed or approved.
    Completed,
    /// Pending or unknown.
    Pending,
    /// Failed or declined.
    Declined,
}

impl TransactionStatus {
    /// Badge group for this status.
    #[must_use]
    pub fn group(&self) -> StatusGroup {
        match self {
            Self::Completed | Self::Approved => StatusGroup::Completed,
            Self::Failed | Self::Declined => StatusGroup::Declined,
            Self::Pending | Self::Unknown => StatusGroup::Pending,
        }
    }
}

impl StatusGroup {
    /// Returns the string representation of the group.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Declined => "declined",
        }
    }
}

impl fmt::Display for StatusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wallet deposit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    /// Provider reference.
    pub reference: String,
    /// Deposit currency.
    pub currency: Currency,
    /// Amount before fees.
    pub sub_total: Decimal,
    /// Fee charged.
    #[serde(default)]
    pub fee: Decimal,
    /// Settlement status.
    pub status: TransactionStatus,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// Card status as reported by the issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardStatus {
    /// Usable.
    Active,
    /// Frozen.
    Disabled,
    /// Any other issuer status.
    #[serde(other)]
    Other,
}

/// Freeze toggle direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreezeAction {
    /// Disable an active card.
    Freeze,
    /// Re-enable a frozen card.
    Unfreeze,
}

impl FreezeAction {
    /// Path segment of the toggle endpoint.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freeze => "freeze",
            Self::Unfreeze => "unfreeze",
        }
    }
}

/// A USD virtual card.
///
/// `Debug` never prints the full number or the CVV.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualCard {
    /// Issuer card id used in card endpoints.
    pub card_id: CardId,
    /// Card network.
    pub brand: String,
    /// Card currency.
    pub currency: Currency,
    /// Masked PAN for display.
    pub masked_pan: String,
    /// Full card number.
    #[serde(default)]
    pub number: String,
    /// Expiry as `MM/YY`.
    #[serde(default)]
    pub expiry: String,
    /// Security code.
    #[serde(default)]
    pub cvv: String,
    /// Available balance.
    #[serde(default)]
    pub balance: Decimal,
    /// Issuer status.
    pub status: CardStatus,
}

impl VirtualCard {
    /// Frozen cards report `DISABLED`.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.status == CardStatus::Disabled
    }

    /// The toggle this card offers.
    #[must_use]
    pub fn freeze_action(&self) -> FreezeAction {
        if self.is_frozen() {
            FreezeAction::Unfreeze
        } else {
            FreezeAction::Freeze
        }
    }
}

impl fmt::Debug for VirtualCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualCard")
            .field("card_id", &self.card_id)
            .field("brand", &self.brand)
            .field("currency", &self.currency)
            .field("masked_pan", &self.masked_pan)
            .field("balance", &self.balance)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Body of `GET /virtual-cards`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualCardsResponse {
    /// Every card the user holds.
    #[serde(default)]
    pub virtual_cards: Vec<VirtualCard>,
}

/// A card authorization or settlement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTransaction {
    /// Merchant description.
    pub description: String,
    /// Transaction amount.
    pub amount: Decimal,
    /// Transaction currency.
    pub currency: Currency,
    /// Issuer status.
    pub status: TransactionStatus,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// A settled currency exchange.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxTransaction {
    /// Exchange reference.
    pub reference: String,
    /// Currency sold.
    pub source_currency: Currency,
    /// Currency bought.
    pub target_currency: Currency,
    /// Amount sold.
    pub source_amount: Decimal,
    /// Amount bought.
    pub target_amount: Decimal,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl FxTransaction {
    /// Effective rate, `target / source`.
    #[must_use]
    pub fn rate(&self) -> Option<Decimal> {
        derived_rate(self.source_amount, self.target_amount)
    }

    /// "1 USD = 1500.00 NGN", or `None` for a zero source amount.
    #[must_use]
    pub fn rate_label(&self) -> Option<String> {
        self.rate()
            .map(|rate| rate_label(self.source_currency, self.target_currency, rate))
    }
}

/// Body of `GET /wallets/my-deposits?page=N`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DepositsPage {
    /// Deposits on this page.
    #[serde(default)]
    pub deposits: Vec<Deposit>,
    /// Server-reported window.
    #[serde(flatten)]
    pub window: PageWindow,
}

/// Body of `GET /virtual-cards/my-transactions?page=N`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTransactionsPage {
    /// Transactions on this page.
    #[serde(default)]
    pub card_transactions: Vec<CardTransaction>,
    /// Server-reported window.
    #[serde(flatten)]
    pub window: PageWindow,
}

/// Body of `GET /fx/my-transactions?page=N`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxTransactionsPage {
    /// Exchanges on this page.
    #[serde(default)]
    pub fx_transactions: Vec<FxTransaction>,
    /// Server-reported window.
    #[serde(flatten)]
    pub window: PageWindow,
}
