//! Money amount bound to a currency.
//!
//! An `Amount` always stores its quantity at exactly the currency's precision.
//! Quantities with fewer fractional digits are padded; quantities with more
//! are rejected, never rounded.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Currency, Decimal};
use crate::error::{MoneyError, MoneyResult};

/// A quantity of money in a given currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AmountRepr", into = "AmountRepr")]
pub struct Amount {
    quantity: Decimal,
    currency: Currency,
}

impl Amount {
    /// Binds `quantity` to `currency`, padding it to the currency's precision.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::TooPrecise`] if the quantity has more fractional
    /// digits than the currency supports.
    pub fn new(quantity: Decimal, currency: Currency) -> MoneyResult<Self> {
        if quantity.precision() > currency.precision() {
            return Err(MoneyError::TooPrecise {
                precision: quantity.precision(),
                currency: currency.code().to_string(),
                currency_precision: currency.precision(),
            });
        }

        Ok(Self {
            quantity: quantity.rescale(currency.precision())?,
            currency,
        })
    }

    /// Parses `value` and `code` and binds them together.
    pub fn parse(value: &str, code: &str) -> MoneyResult<Self> {
        Self::new(Decimal::parse(value)?, Currency::parse(code)?)
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            quantity: Decimal::new(0, currency.precision()),
            currency,
        }
    }

    /// Binds `quantity` to `currency` by rescaling it to the currency's precision.
    ///
    /// Unlike [`Amount::new`], extra fractional digits are truncated toward zero
    /// instead of rejected. Used for computed quantities such as conversions.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if padding the quantity does not fit.
    pub fn truncated(quantity: Decimal, currency: Currency) -> MoneyResult<Self> {
        Ok(Self {
            quantity: quantity.rescale(currency.precision())?,
            currency,
        })
    }

    /// The quantity, always at the currency's precision.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// The currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.quantity.is_negative()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.currency)
    }
}

/// Wire form: the quantity as a string plus the currency code.
#[derive(Serialize, Deserialize)]
struct AmountRepr {
    quantity: Decimal,
    currency: Currency,
}

impl TryFrom<AmountRepr> for Amount {
    type Error = MoneyError;

    fn try_from(repr: AmountRepr) -> Result<Self, Self::Error> {
        Self::new(repr.quantity, repr.currency)
    }
}

impl From<Amount> for AmountRepr {
    fn from(amount: Amount) -> Self {
        Self {
            quantity: amount.quantity,
            currency: amount.currency,
        }
    }
}
