//! Exchange domain types.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vaultdash_shared::types::{Currency, QuoteReference};

use super::validation::ValidQuote;

/// A rate-locked proposal returned by the server.
///
/// Never mutated in place: a new quote replaces the old one wholesale.
/// The server expires it three minutes after issue; the client does not
/// track that deadline and only reports the server's rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Server reference consumed by the execute call.
    pub quote_reference: QuoteReference,
    /// Currency being sold.
    pub source_currency: Currency,
    /// Currency being bought.
    pub target_currency: Currency,
    /// Amount the user asked to exchange.
    pub source_amount: Decimal,
    /// Amount the server will credit.
    pub target_amount: Decimal,
    /// 1 source = `exchange_rate` target.
    pub exchange_rate: Decimal,
}

impl Quote {
    /// Combines validated form input with the server's answer.
    #[must_use]
    pub fn new(input: &ValidQuote, response: QuoteResponse) -> Self {
        Self {
            quote_reference: response.quote_reference,
            source_currency: input.source,
            target_currency: input.target,
            source_amount: input.amount,
            target_amount: response.target_amount,
            exchange_rate: response.exchange_rate,
        }
    }
}

/// Discriminant of [`ExchangeState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeStatus {
    /// No quote held.
    Idle,
    /// A quote is held and may be executed or reset.
    Quoted,
}

impl ExchangeStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Quoted => "quoted",
        }
    }
}

impl fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-held exchange state.
///
/// Valid transitions:
/// - Idle → Quoted (quote generated)
/// - Quoted → Idle (reset, executed, or execute failed)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExchangeState {
    /// No quote held.
    #[default]
    Idle,
    /// Holding exactly one quote.
    Quoted(Quote),
}

impl ExchangeState {
    /// Returns the status discriminant.
    #[must_use]
    pub fn status(&self) -> ExchangeStatus {
        match self {
            Self::Idle => ExchangeStatus::Idle,
            Self::Quoted(_) => ExchangeStatus::Quoted,
        }
    }

    /// Held quote, if any.
    #[must_use]
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            Self::Idle => None,
            Self::Quoted(quote) => Some(quote),
        }
    }
}

/// Body of `POST /fx/generate-quote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Currency being sold.
    pub source_currency: Currency,
    /// Currency being bought.
    pub target_currency: Currency,
    /// Amount to sell, sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<&ValidQuote> for QuoteRequest {
    fn from(input: &ValidQuote) -> Self {
        Self {
            source_currency: input.source,
            target_currency: input.target,
            amount: input.amount,
        }
    }
}

/// Answer of `POST /fx/generate-quote`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Reference to execute.
    pub quote_reference: QuoteReference,
    /// Locked rate.
    pub exchange_rate: Decimal,
    /// Amount that would be credited.
    pub target_amount: Decimal,
}

/// Body of `POST /fx/exchange-currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    /// Reference of the held quote.
    pub quote_reference: QuoteReference,
}

/// Answer of `POST /fx/exchange-currency`. Only the message is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExecuteResponse {
    /// Optional server message.
    #[serde(default)]
    pub message: Option<String>,
}
