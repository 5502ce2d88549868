//! Rate display.
//!
//! Rates at or above 1 show two decimal places, smaller rates four, so that
//! pairs like NGN→USD do not collapse to `0.00`.

use rust_decimal::{Decimal, RoundingStrategy};
use vaultdash_shared::types::Currency;

/// Server-side quote lifetime shown to the user. Not enforced locally.
pub const QUOTE_VALIDITY_MINUTES: u32 = 3;

/// Formats an exchange rate for display.
#[must_use]
pub fn format_rate(rate: Decimal) -> String {
    let (places, width) = if rate >= Decimal::ONE { (2, 2) } else { (4, 4) };
    let rounded = rate.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.width$}")
}

/// Effective rate of a settled exchange, `target / source`.
///
/// Returns `None` for a zero source amount.
#[must_use]
pub fn derived_rate(source_amount: Decimal, target_amount: Decimal) -> Option<Decimal> {
    target_amount.checked_div(source_amount)
}

/// "1 USD = 1500.00 NGN".
#[must_use]
pub fn rate_label(source: Currency, target: Currency, rate: Decimal) -> String {
    format!("1 {source} = {} {target}", format_rate(rate))
}

/// Expiry hint shown under a held quote.
#[must_use]
pub fn expiry_hint() -> String {
    format!("Quote expires in {QUOTE_VALIDITY_MINUTES} minutes from generation time")
}
