//! Fixed-point money types.

pub mod amount;
pub mod currency;
pub mod decimal;

#[cfg(test)]
mod props;

pub use amount::Amount;
pub use currency::Currency;
pub use decimal::{Decimal, pow10, pow10_wide};
