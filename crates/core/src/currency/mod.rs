//! Multi-currency handling and exchange rates.

pub mod conversion;
pub mod exchange;
pub mod service;

#[cfg(test)]
mod props;

pub use conversion::{apply_exchange_rate, convert};
pub use exchange::{ExchangeRate, RateLookupMethod, RateProvider, RateTable, ResolvedRate};
pub use service::CurrencyService;
