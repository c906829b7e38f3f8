//! Property-based tests for currency conversion.
//!
//! - Conversion result precision equals the target precision
//! - Downscaling truncates toward zero
//! - Identity rate preserves the value whenever the target is at least as precise

use chrono::NaiveDate;
use proptest::prelude::*;
use tally_shared::{Amount, Currency, Decimal};

use super::conversion::apply_exchange_rate;
use super::exchange::ExchangeRate;

/// Strategy to generate currencies covering every precision (0 to 3).
fn currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(vec!["IRR", "VND", "CNY", "EUR", "USD", "BHD", "KWD", "XYZ"])
        .prop_map(|code| Currency::parse(code).unwrap())
}

/// Strategy to generate amounts (up to 10^12 units, either sign).
fn amount() -> impl Strategy<Value = Amount> {
    (currency(), -1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|(currency, units)| {
        Amount::new(Decimal::new(units, 0), currency).unwrap()
    })
}

/// Strategy to generate positive rates (precision 0 to 8, up to 10^6 units).
fn rate_value() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64, 0u8..=8).prop_map(|(subunits, precision)| Decimal::new(subunits, precision))
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The result always has exactly the target currency's precision.
    #[test]
    fn prop_result_precision_is_target_precision(
        amount in amount(),
        target in currency(),
        value in rate_value(),
    ) {
        let rate = ExchangeRate::new(amount.currency(), target, value, date()).unwrap();
        if let Ok(converted) = apply_exchange_rate(&amount, target, &rate) {
            prop_assert_eq!(converted.quantity().precision(), target.precision());
            prop_assert_eq!(converted.currency(), target);
        }
    }

    /// The result is the exact product divided toward zero at the target precision.
    #[test]
    fn prop_truncates_toward_zero(
        amount in amount(),
        target in currency(),
        value in rate_value(),
    ) {
        let rate = ExchangeRate::new(amount.currency(), target, value, date()).unwrap();
        let quantity = amount.quantity();

        let product = i128::from(quantity.subunits()) * i128::from(value.subunits());
        let product_precision = u32::from(quantity.precision()) + u32::from(value.precision());
        let target_precision = u32::from(target.precision());

        let expected = if product_precision >= target_precision {
            product / 10_i128.pow(product_precision - target_precision)
        } else {
            product * 10_i128.pow(target_precision - product_precision)
        };

        match apply_exchange_rate(&amount, target, &rate) {
            Ok(converted) => {
                let subunits = i128::from(converted.quantity().subunits());
                prop_assert_eq!(subunits, expected);

                if product_precision > target_precision {
                    let factor = 10_i128.pow(product_precision - target_precision);
                    let remainder = product - subunits * factor;
                    // Dropped digits are below one minor unit and share the product's sign.
                    prop_assert!(remainder.abs() < factor);
                    prop_assert!(remainder == 0 || remainder.signum() == product.signum());
                }
            }
            Err(_) => prop_assert!(i64::try_from(expected).is_err()),
        }
    }

    /// Converting with a rate of 1 into an equally or more precise currency keeps the value.
    #[test]
    fn prop_identity_rate_preserves_value(amount in amount(), target in currency()) {
        prop_assume!(target.precision() >= amount.currency().precision());

        let rate = ExchangeRate::identity(amount.currency(), date());
        let converted = apply_exchange_rate(&amount, target, &rate).unwrap();
        prop_assert_eq!(converted.quantity().normalized(), amount.quantity().normalized());
    }
}
