//! Client-side quote preconditions.
//!
//! Checks run in a fixed order and stop at the first failure, so each
//! violation produces exactly one message. The balance check is advisory;
//! the server enforces the real limit.

use rust_decimal::Decimal;
use vaultdash_shared::types::Currency;
use vaultdash_shared::types::money::parse_amount;

use super::error::QuoteValidationError;

/// Raw quote form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteForm {
    /// Selected source currency.
    pub source_currency: Option<Currency>,
    /// Selected target currency.
    pub target_currency: Option<Currency>,
    /// Amount text as typed.
    pub amount: String,
}

/// Quote input that passed every precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidQuote {
    /// Currency being sold.
    pub source: Currency,
    /// Currency being bought.
    pub target: Currency,
    /// Positive amount to sell.
    pub amount: Decimal,
}

impl QuoteForm {
    /// Creates a fully filled form.
    #[must_use]
    pub fn new(source: Currency, target: Currency, amount: impl Into<String>) -> Self {
        Self {
            source_currency: Some(source),
            target_currency: Some(target),
            amount: amount.into(),
        }
    }

    /// Validates the form. `balance_of` looks up the already-fetched
    /// balance of a wallet; a missing wallet skips the balance check.
    pub fn validate<F>(&self, balance_of: F) -> Result<ValidQuote, QuoteValidationError>
    where
        F: Fn(Currency) -> Option<Decimal>,
    {
        let source = self
            .source_currency
            .ok_or(QuoteValidationError::MissingSourceCurrency)?;
        let target = self
            .target_currency
            .ok_or(QuoteValidationError::MissingTargetCurrency)?;

        if source == target {
            return Err(QuoteValidationError::SameCurrency);
        }

        let amount = parse_amount(&self.amount)
            .filter(|amount| amount.is_sign_positive() && !amount.is_zero())
            .ok_or(QuoteValidationError::InvalidAmount)?;

        if let Some(balance) = balance_of(source)
            && balance < amount
        {
            return Err(QuoteValidationError::InsufficientBalance(source));
        }

        Ok(ValidQuote {
            source,
            target,
            amount,
        })
    }
}
