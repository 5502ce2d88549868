//! Currency codes and amount input parsing.
//!
//! CRITICAL: Never use floating-point for money.
//! Amounts are `rust_decimal::Decimal` end to end.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes a wallet can be held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Nigerian Naira
    Ngn,
    /// Ghanaian Cedi
    Ghs,
    /// Kenyan Shilling
    Kes,
}

impl Currency {
    /// Every supported currency, in display order.
    pub const ALL: [Self; 4] = [Self::Usd, Self::Ngn, Self::Ghs, Self::Kes];

    /// Returns the ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Ngn => "NGN",
            Self::Ghs => "GHS",
            Self::Kes => "KES",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "NGN" => Ok(Self::Ngn),
            "GHS" => Ok(Self::Ghs),
            "KES" => Ok(Self::Kes),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

/// Parses user-entered amount text.
///
/// Accepts digits with an optional decimal point followed by at most two
/// digits. Anything else, including signs and exponents, is rejected.
#[must_use]
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let input = input.trim();
    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (input, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(fraction) = fraction
        && (fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    input.trim_end_matches('.').parse().ok()
}
