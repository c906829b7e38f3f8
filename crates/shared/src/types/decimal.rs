//! Exact fixed-point decimal.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! A `Decimal` is an integer number of subunits scaled by `10^-precision`,
//! e.g. `1.52` is stored as `{ subunits: 152, precision: 2 }`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MoneyError, MoneyResult};

/// Number of characters allowed in the integer part: the digits of a thousand billion.
pub const MAX_INTEGER_DIGITS: usize = 12;

/// Raises 10 to `power`.
///
/// Exact for every power whose result fits in an `i64` (0 to 18), `None` above that.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
pub const fn pow10(power: u32) -> Option<i64> {
    match pow10_wide(power) {
        // Bounded by i64::MAX, so the cast is exact.
        Some(value) if value <= i64::MAX as i128 => Some(value as i64),
        _ => None,
    }
}

/// Raises 10 to `power` in 128 bits, `None` above `10^38`.
///
/// Every rescale takes its factor from here.
#[must_use]
pub const fn pow10_wide(power: u32) -> Option<i128> {
    match power {
        0 => Some(1),
        1 => Some(10),
        2 => Some(100),
        3 => Some(1_000),
        _ => 10_i128.checked_pow(power),
    }
}

/// Moves `subunits` from precision `from` to precision `to` in 128-bit space.
///
/// Shrinking truncates toward zero. A divisor beyond the `i128` range means the
/// magnitude is below one target subunit, so the result is zero.
fn rescale_wide(subunits: i128, from: u32, to: u32) -> Option<i128> {
    match from.cmp(&to) {
        Ordering::Greater => Some(pow10_wide(from - to).map_or(0, |factor| subunits / factor)),
        Ordering::Less => subunits.checked_mul(pow10_wide(to - from)?),
        Ordering::Equal => Some(subunits),
    }
}

/// Exact fixed-point number: `subunits * 10^-precision`.
///
/// Equality is structural: `1.5` (`15`, precision 1) and `1.50` (`150`,
/// precision 2) are different representations of the same value. Use
/// [`Decimal::normalized`] to compare values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    /// Value expressed in units of `10^-precision`.
    subunits: i64,
    /// Number of digits after the decimal point.
    precision: u8,
}

impl Decimal {
    /// Zero at precision 0, the canonical zero.
    pub const ZERO: Self = Self::new(0, 0);

    /// One at precision 0.
    pub const ONE: Self = Self::new(1, 0);

    /// Creates a decimal from raw parts, keeping the given precision as is.
    #[must_use]
    pub const fn new(subunits: i64, precision: u8) -> Self {
        Self {
            subunits,
            precision,
        }
    }

    /// Parses a decimal string such as `"-12.50"`.
    ///
    /// The text is split on the first `.`; integer and fractional digits are
    /// joined and parsed as a single `i64`, and the number of fractional digits
    /// becomes the precision. The result is normalized.
    ///
    /// # Errors
    ///
    /// - [`MoneyError::TooLarge`] if the integer part exceeds 12 characters.
    /// - [`MoneyError::InvalidDecimal`] if the joined digits are not a valid `i64`.
    /// - [`MoneyError::Overflow`] if the fractional part is longer than 255 digits,
    ///   the largest precision a `Decimal` can carry. Only leading zeros get
    ///   that far, since all the digits must also fit in an `i64`.
    pub fn parse(value: &str) -> MoneyResult<Self> {
        let (int_part, frac_part) = value.split_once('.').unwrap_or((value, ""));

        if int_part.len() > MAX_INTEGER_DIGITS {
            return Err(MoneyError::TooLarge);
        }

        let subunits = format!("{int_part}{frac_part}")
            .parse::<i64>()
            .map_err(|source| MoneyError::InvalidDecimal {
                value: value.to_string(),
                source,
            })?;
        let precision = u8::try_from(frac_part.len()).map_err(|_| MoneyError::Overflow)?;

        Ok(Self::new(subunits, precision).normalized())
    }

    /// Subunits, the value scaled by `10^precision`.
    #[must_use]
    pub const fn subunits(&self) -> i64 {
        self.subunits
    }

    /// Digits after the decimal point.
    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.subunits == 0
    }

    /// Returns true if the value is below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.subunits < 0
    }

    /// Returns the canonical form: trailing zero digits stripped from the subunits.
    ///
    /// Zero always normalizes to precision 0.
    #[must_use]
    pub const fn normalized(mut self) -> Self {
        while self.subunits % 10 == 0 && self.precision > 0 {
            self.subunits /= 10;
            self.precision -= 1;
        }
        self
    }

    /// Returns the same value expressed with exactly `precision` digits.
    ///
    /// Growing the precision pads the subunits and is exact. Shrinking
    /// truncates toward zero: `1.234` at precision 2 is `1.23`, `-1.239` is `-1.23`.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the padded subunits do not fit in an `i64`.
    pub fn rescale(&self, precision: u8) -> MoneyResult<Self> {
        let subunits = rescale_wide(
            i128::from(self.subunits),
            u32::from(self.precision),
            u32::from(precision),
        )
        .and_then(|wide| i64::try_from(wide).ok())
        .ok_or(MoneyError::Overflow)?;

        Ok(Self::new(subunits, precision))
    }

    /// Exact product: subunits multiply and precisions add.
    ///
    /// The product is computed in 128 bits and normalized before being
    /// narrowed, so trailing zeros never cause a spurious overflow.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the normalized product does not fit.
    pub fn checked_mul(&self, rhs: &Self) -> MoneyResult<Self> {
        let mut subunits = i128::from(self.subunits) * i128::from(rhs.subunits);
        let mut precision = u32::from(self.precision) + u32::from(rhs.precision);

        while subunits % 10 == 0 && precision > 0 {
            subunits /= 10;
            precision -= 1;
        }

        let subunits = i64::try_from(subunits).map_err(|_| MoneyError::Overflow)?;
        let precision = u8::try_from(precision).map_err(|_| MoneyError::Overflow)?;

        Ok(Self::new(subunits, precision))
    }

    /// Multiplies by `rhs` and rescales the product to `precision` in one step.
    ///
    /// The intermediate product stays in 128 bits; only the rescaled result
    /// has to fit in an `i64`. Shrinking truncates toward zero like [`Decimal::rescale`].
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the rescaled result does not fit.
    pub fn mul_rescaled(&self, rhs: &Self, precision: u8) -> MoneyResult<Self> {
        let product = i128::from(self.subunits) * i128::from(rhs.subunits);
        let product_precision = u32::from(self.precision) + u32::from(rhs.precision);

        let subunits = rescale_wide(product, product_precision, u32::from(precision))
            .and_then(|wide| i64::try_from(wide).ok())
            .ok_or(MoneyError::Overflow)?;

        Ok(Self::new(subunits, precision))
    }
}

impl FromStr for Decimal {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.subunits < 0 { "-" } else { "" };
        let magnitude = self.subunits.unsigned_abs();

        if self.precision == 0 {
            return write!(f, "{sign}{magnitude}");
        }

        let precision = usize::from(self.precision);
        let digits = format!("{magnitude:0>width$}", width = precision + 1);
        let (units, fraction) = digits.split_at(digits.len() - precision);
        write!(f, "{sign}{units}.{fraction}")
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
