//! Currency codes and their minor-unit precision.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MoneyError, MoneyResult};

/// Length of a currency code.
pub const CODE_LEN: usize = 3;

/// Minor-unit precision used for every code not listed in the lookup table.
pub const DEFAULT_PRECISION: u8 = 2;

/// A currency code with its number of minor-unit digits.
///
/// Built only through [`Currency::parse`], so the code is always 3 bytes long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency {
    code: [u8; CODE_LEN],
    precision: u8,
}

/// Minor-unit digits for a currency code.
///
/// Unknown codes get [`DEFAULT_PRECISION`]; the lookup never rejects a well-formed code.
const fn precision_for(code: [u8; CODE_LEN]) -> u8 {
    match &code {
        b"IRR" => 0,
        b"CNY" | b"VND" => 1,
        b"BHD" | b"IQD" | b"KWD" | b"LYD" | b"OMR" | b"TND" => 3,
        _ => DEFAULT_PRECISION,
    }
}

impl Currency {
    /// US Dollar, the default triangulation pivot.
    pub const USD: Self = Self {
        code: *b"USD",
        precision: DEFAULT_PRECISION,
    };

    /// Looks up the currency for a 3-character code.
    ///
    /// Codes are matched exactly as given; `"eur"` is a distinct, unknown code.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidCurrencyCode`] if `code` is not exactly 3 bytes long.
    pub fn parse(code: &str) -> MoneyResult<Self> {
        let code: [u8; CODE_LEN] = code
            .as_bytes()
            .try_into()
            .map_err(|_| MoneyError::InvalidCurrencyCode(code.to_string()))?;

        Ok(Self {
            code,
            precision: precision_for(code),
        })
    }

    /// The 3-character code.
    #[must_use]
    pub fn code(&self) -> &str {
        // Always the bytes of a whole `&str`, so valid UTF-8.
        std::str::from_utf8(&self.code).unwrap_or_default()
    }

    /// Number of digits after the decimal point for this currency.
    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::parse(&code).map_err(serde::de::Error::custom)
    }
}
