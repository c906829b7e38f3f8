//! Currency conversion logic.
//!
//! CRITICAL: Rescaling strategy for multi-currency:
//! - The amount is multiplied by the rate exactly (subunits multiply, precisions add)
//! - The product is rescaled to the target currency's precision
//! - Digits below the target's minor unit are truncated toward zero, never rounded

use chrono::NaiveDate;
use tally_shared::{Amount, Currency, MoneyResult};

use super::exchange::{ExchangeRate, RateProvider};

/// Converts `amount` into `target` by applying `rate`.
///
/// The result always has exactly `target.precision()` fractional digits.
/// When the product is more precise than the target, the extra digits are
/// dropped: 12.34 at a rate of 0.1 gives 1.234, stored as 1.23.
///
/// The rate's own currencies are not checked against `amount` and `target`;
/// callers resolving rates through a [`RateProvider`] should use [`convert`].
///
/// # Errors
///
/// Returns [`tally_shared::MoneyError::Overflow`] if the converted subunits do not fit.
pub fn apply_exchange_rate(
    amount: &Amount,
    target: Currency,
    rate: &ExchangeRate,
) -> MoneyResult<Amount> {
    let converted = amount
        .quantity()
        .mul_rescaled(&rate.rate(), target.precision())?;

    Amount::truncated(converted, target)
}

/// Converts `amount` into `to` using the rate `provider` resolves for `date`.
///
/// # Errors
///
/// Propagates rate lookup failures and conversion overflow.
pub fn convert<P: RateProvider + ?Sized>(
    amount: &Amount,
    to: Currency,
    provider: &P,
    date: NaiveDate,
) -> MoneyResult<Amount> {
    let resolved = provider.find_rate(amount.currency(), to, date)?;
    apply_exchange_rate(amount, to, &resolved.rate)
}
