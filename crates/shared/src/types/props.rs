//! Property-based tests for the fixed-point money types.
//!
//! - Decimal parse/display round-trip
//! - Normalization idempotence
//! - Amount precision invariant
//! - Currency lookup totality

use proptest::prelude::*;

use super::currency::DEFAULT_PRECISION;
use super::{Amount, Currency, Decimal};
use crate::error::MoneyError;

/// Strategy to generate decimal text with up to 11 integer digits (12 characters
/// with the sign) and up to 6 fractional digits.
fn decimal_text() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        0u64..100_000_000_000u64,
        prop::option::of("[0-9]{1,6}"),
    )
        .prop_map(|(negative, units, fraction)| {
            let sign = if negative { "-" } else { "" };
            match fraction {
                Some(fraction) => format!("{sign}{units}.{fraction}"),
                None => format!("{sign}{units}"),
            }
        })
}

/// Strategy to generate raw decimals (subunits up to 10^15, precision 0 to 6).
fn raw_decimal() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000_000i64..1_000_000_000_000_000i64, 0u8..=6)
        .prop_map(|(subunits, precision)| Decimal::new(subunits, precision))
}

/// Strategy to generate currencies, mixing listed codes with arbitrary ones.
fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![
        prop::sample::select(vec!["IRR", "CNY", "VND", "BHD", "KWD", "EUR", "USD"]),
        Just("XYZ"),
    ]
    .prop_map(|code| Currency::parse(code).unwrap())
}

/// Strips a textual decimal down to its canonical digits for comparison.
fn canonical_text(text: &str) -> String {
    let (sign, digits) = text.strip_prefix('-').map_or(("", text), |rest| ("-", rest));
    let (units, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let units = units.trim_start_matches('0');
    let fraction = fraction.trim_end_matches('0');
    let units = if units.is_empty() { "0" } else { units };

    if fraction.is_empty() && units == "0" {
        "0".to_string()
    } else if fraction.is_empty() {
        format!("{sign}{units}")
    } else {
        format!("{sign}{units}.{fraction}")
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Parsing then displaying reproduces the value modulo trailing zeros.
    #[test]
    fn prop_parse_display_round_trip(text in decimal_text()) {
        let parsed = Decimal::parse(&text).unwrap();
        prop_assert_eq!(parsed.to_string(), canonical_text(&text));
    }

    /// Parsed decimals are normalized and normalizing again changes nothing.
    #[test]
    fn prop_parse_output_is_normalized(text in decimal_text()) {
        let parsed = Decimal::parse(&text).unwrap();
        prop_assert!(parsed.subunits() % 10 != 0 || parsed.precision() == 0);
        prop_assert_eq!(parsed.normalized(), parsed);
    }

    /// Normalization is idempotent for every raw decimal.
    #[test]
    fn prop_normalization_idempotent(value in raw_decimal()) {
        let once = value.normalized();
        prop_assert_eq!(once.normalized(), once);
        prop_assert!(once.subunits() % 10 != 0 || once.precision() == 0);
    }

    /// More than 12 integer characters always fails before numeric parsing.
    #[test]
    fn prop_long_integer_part_is_too_large(digits in "[0-9a-z]{13,20}") {
        prop_assert_eq!(Decimal::parse(&digits), Err(MoneyError::TooLarge));
    }

    /// An amount is either at the currency's precision or rejected as too precise.
    #[test]
    fn prop_amount_precision_matches_currency(
        value in raw_decimal(),
        currency in currency(),
    ) {
        match Amount::new(value, currency) {
            Ok(amount) => {
                prop_assert!(value.precision() <= currency.precision());
                prop_assert_eq!(amount.quantity().precision(), currency.precision());
                prop_assert_eq!(amount.quantity().normalized(), value.normalized());
            }
            Err(err) => {
                prop_assert!(value.precision() > currency.precision());
                let is_too_precise = matches!(err, MoneyError::TooPrecise { .. });
                prop_assert!(is_too_precise);
            }
        }
    }

    /// Every 3-character code resolves; unknown ones at the default precision.
    #[test]
    fn prop_currency_lookup_is_total(code in "[A-Z]{3}") {
        let currency = Currency::parse(&code).unwrap();
        let expected = match code.as_str() {
            "IRR" => 0,
            "CNY" | "VND" => 1,
            "BHD" | "IQD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
            _ => DEFAULT_PRECISION,
        };
        prop_assert_eq!(currency.precision(), expected);
        prop_assert_eq!(currency.code(), code.as_str());
    }

    /// Any code that is not 3 bytes long is rejected.
    #[test]
    fn prop_currency_wrong_length_rejected(code in "[A-Z]{0,2}|[A-Z]{4,8}") {
        prop_assert_eq!(
            Currency::parse(&code),
            Err(MoneyError::InvalidCurrencyCode(code.clone()))
        );
    }
}
