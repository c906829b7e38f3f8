//! Money error types.
//!
//! Every failure in this workspace is a local validation or range error.
//! None of them is transient, so callers treat any error as terminal for
//! the operation that raised it.

use std::num::ParseIntError;

use thiserror::Error;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors raised while parsing, building, or converting money values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Currency code is not exactly 3 characters long.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    /// Decimal text could not be parsed as an integer once the separator was removed.
    #[error("Unable to convert the decimal {value:?}: {source}")]
    InvalidDecimal {
        /// The text that failed to parse.
        value: String,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },

    /// Integer part has more digits than a thousand billion.
    #[error("Quantity over 10^12 is too large")]
    TooLarge,

    /// Quantity carries more fractional digits than the currency supports.
    #[error("Quantity with precision {precision} is too precise for {currency} (precision {currency_precision})")]
    TooPrecise {
        /// Precision of the rejected quantity.
        precision: u8,
        /// Currency code the quantity was bound to.
        currency: String,
        /// Precision of that currency.
        currency_precision: u8,
    },

    /// Fixed-point arithmetic left the range of a signed 64-bit integer.
    #[error("Arithmetic overflow in fixed-point operation")]
    Overflow,

    /// No exchange rate could be resolved for the currency pair.
    #[error("No exchange rate found for {from} to {to}")]
    RateNotFound {
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
    },

    /// Exchange rate must be positive.
    #[error("Exchange rate must be positive")]
    InvalidExchangeRate,
}

impl MoneyError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCurrencyCode(_) => "INVALID_CURRENCY_CODE",
            Self::InvalidDecimal { .. } => "INVALID_DECIMAL",
            Self::TooLarge => "TOO_LARGE",
            Self::TooPrecise { .. } => "TOO_PRECISE",
            Self::Overflow => "OVERFLOW",
            Self::RateNotFound { .. } => "RATE_NOT_FOUND",
            Self::InvalidExchangeRate => "INVALID_EXCHANGE_RATE",
        }
    }

    /// Returns true if retrying the operation could succeed.
    ///
    /// Always false: money operations are pure functions of their inputs.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}
