//! Property-based tests for quote validation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use vaultdash_shared::types::Currency;

use super::error::QuoteValidationError;
use super::validation::QuoteForm;

fn arb_currency() -> impl Strategy<Value = Option<Currency>> {
    prop_oneof![
        Just(None),
        Just(Some(Currency::Usd)),
        Just(Some(Currency::Ngn)),
        Just(Some(Currency::Ghs)),
        Just(Some(Currency::Kes)),
    ]
}

fn arb_amount_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[0-9]{1,7}",
        "[0-9]{1,7}\\.[0-9]{1,2}",
        "[0-9]{1,4}\\.[0-9]{3,5}",
        "[a-z-]{1,5}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Validation is a pure function: the result only depends on the form
    /// and balances, and a failure names the first violated precondition.
    #[test]
    fn prop_failure_is_first_violation(
        source in arb_currency(),
        target in arb_currency(),
        amount in arb_amount_text(),
        balance in 0u32..1_000_000,
    ) {
        let form = QuoteForm { source_currency: source, target_currency: target, amount };
        let balance = Decimal::from(balance);
        let result = form.validate(|_| Some(balance));

        let expected = if source.is_none() {
            Some(QuoteValidationError::MissingSourceCurrency)
        } else if target.is_none() {
            Some(QuoteValidationError::MissingTargetCurrency)
        } else if source == target {
            Some(QuoteValidationError::SameCurrency)
        } else {
            None
        };

        match (expected, result) {
            (Some(expected), result) => prop_assert_eq!(result, Err(expected)),
            (None, Ok(valid)) => {
                prop_assert!(valid.amount > Decimal::ZERO);
                prop_assert!(valid.amount <= balance);
                prop_assert_ne!(valid.source, valid.target);
            }
            (None, Err(err)) => prop_assert!(matches!(
                err,
                QuoteValidationError::InvalidAmount | QuoteValidationError::InsufficientBalance(_)
            )),
        }
    }
}
