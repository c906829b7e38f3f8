//! Currency service for conversion and exchange rate operations.
//!
//! This module provides the main service interface for currency operations:
//! rate resolution through a [`RateProvider`] followed by exact conversion.

use chrono::{NaiveDate, Utc};
use tally_shared::{Amount, Currency, MoneyResult};
use tracing::{debug, warn};

use super::conversion::apply_exchange_rate;
use super::exchange::{RateProvider, ResolvedRate};

/// Currency service for conversion operations.
///
/// Owns a rate provider and converts amounts with the rate it resolves.
/// Results are truncated toward zero at the target currency's precision.
#[derive(Debug, Clone)]
pub struct CurrencyService<P> {
    provider: P,
}

impl<P: RateProvider> CurrencyService<P> {
    /// Creates a service backed by `provider`.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The underlying rate provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Converts `amount` into `to` with today's rate.
    ///
    /// # Example
    ///
    /// ```
    /// use tally_core::currency::{CurrencyService, ExchangeRate, RateTable};
    /// use tally_shared::{Amount, Currency, Decimal};
    ///
    /// let eur = Currency::parse("EUR").unwrap();
    /// let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let mut table = RateTable::new(Currency::USD);
    /// table.insert(ExchangeRate::new(eur, Currency::USD, Decimal::new(108, 2), date).unwrap());
    ///
    /// let service = CurrencyService::new(table);
    /// let amount = Amount::parse("10", "EUR").unwrap();
    /// let converted = service.convert(&amount, Currency::USD).unwrap();
    /// assert_eq!(converted.to_string(), "10.80 USD");
    /// ```
    pub fn convert(&self, amount: &Amount, to: Currency) -> MoneyResult<Amount> {
        self.convert_on(amount, to, Utc::now().date_naive())
    }

    /// Converts `amount` into `to` with the rate that applies on `date`.
    pub fn convert_on(&self, amount: &Amount, to: Currency, date: NaiveDate) -> MoneyResult<Amount> {
        self.convert_resolved(amount, to, date).map(|(converted, _)| converted)
    }

    /// Like [`CurrencyService::convert_on`], also returning the rate that was applied.
    ///
    /// The rate is resolved exactly once.
    pub fn convert_resolved(
        &self,
        amount: &Amount,
        to: Currency,
        date: NaiveDate,
    ) -> MoneyResult<(Amount, ResolvedRate)> {
        let resolved = self.resolve(amount.currency(), to, date)?;
        let converted = apply_exchange_rate(amount, to, &resolved.rate)?;

        debug!(
            %amount,
            %converted,
            rate = %resolved.rate.rate(),
            method = ?resolved.method,
            %date,
            "Converted amount"
        );

        Ok((converted, resolved))
    }

    /// Resolves the rate for a currency pair, logging lookups that fail.
    pub fn resolve(&self, from: Currency, to: Currency, date: NaiveDate) -> MoneyResult<ResolvedRate> {
        self.provider.find_rate(from, to, date).inspect_err(|err| {
            warn!(%from, %to, %date, error = %err, "Exchange rate lookup failed");
        })
    }
}
