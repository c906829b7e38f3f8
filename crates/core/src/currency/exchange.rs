//! Exchange rate types and rate lookup.

use chrono::NaiveDate;
use serde::Serialize;
use tally_shared::config::RatesConfig;
use tally_shared::{Currency, Decimal, MoneyError, MoneyResult};

/// Exchange rate between two currencies: 1 `from` = `rate` `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExchangeRate {
    from: Currency,
    to: Currency,
    rate: Decimal,
    effective_date: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidExchangeRate`] if `rate` is zero or negative.
    pub fn new(
        from: Currency,
        to: Currency,
        rate: Decimal,
        effective_date: NaiveDate,
    ) -> MoneyResult<Self> {
        if rate.is_zero() || rate.is_negative() {
            return Err(MoneyError::InvalidExchangeRate);
        }

        Ok(Self {
            from,
            to,
            rate,
            effective_date,
        })
    }

    /// Rate of exactly 1 from a currency to itself.
    #[must_use]
    pub const fn identity(currency: Currency, effective_date: NaiveDate) -> Self {
        Self {
            from: currency,
            to: currency,
            rate: Decimal::ONE,
            effective_date,
        }
    }

    /// Source currency.
    #[must_use]
    pub const fn from(&self) -> Currency {
        self.from
    }

    /// Target currency.
    #[must_use]
    pub const fn to(&self) -> Currency {
        self.to
    }

    /// Units of `to` per unit of `from`.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Date from which this rate applies.
    #[must_use]
    pub const fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    /// Composes `self` (A to B) with `next` (B to C) into A to C.
    ///
    /// The rates multiply exactly; the result takes the later effective date.
    ///
    /// # Errors
    ///
    /// - [`MoneyError::RateNotFound`] if `next` does not start where `self` ends.
    /// - [`MoneyError::Overflow`] if the product does not fit.
    pub fn chain(&self, next: &Self) -> MoneyResult<Self> {
        if self.to != next.from {
            return Err(MoneyError::RateNotFound {
                from: self.from.code().to_string(),
                to: next.to.code().to_string(),
            });
        }

        Ok(Self {
            from: self.from,
            to: next.to,
            rate: self.rate.checked_mul(&next.rate)?,
            effective_date: self.effective_date.max(next.effective_date),
        })
    }
}

/// How a rate was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLookupMethod {
    /// Direct rate found (from -> to), or same currency.
    Direct,
    /// Chained through the pivot currency (from -> pivot -> to).
    Triangulated,
}

/// A rate together with the way it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedRate {
    /// The rate to apply.
    pub rate: ExchangeRate,
    /// Lookup path used.
    pub method: RateLookupMethod,
}

/// Source of exchange rates for a currency pair on a date.
pub trait RateProvider {
    /// Finds the rate converting `from` into `to` that applies on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::RateNotFound`] if no rate applies.
    fn find_rate(&self, from: Currency, to: Currency, date: NaiveDate) -> MoneyResult<ResolvedRate>;
}

/// In-memory rate table.
///
/// Lookup order:
/// 1. Same currency: rate of 1
/// 2. Direct rate: most recent rate on or before the date
/// 3. Triangulation through the pivot currency
///
/// Inverse rates (1 / stored rate) are never derived: the division is not
/// exact in fixed point.
#[derive(Debug, Clone)]
pub struct RateTable {
    pivot: Currency,
    rates: Vec<ExchangeRate>,
}

impl RateTable {
    /// Creates an empty table triangulating through `pivot`.
    #[must_use]
    pub const fn new(pivot: Currency) -> Self {
        Self {
            pivot,
            rates: Vec::new(),
        }
    }

    /// Creates a table from the configured pivot and entries.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidExchangeRate`] if an entry's rate is not positive.
    pub fn from_config(config: &RatesConfig) -> MoneyResult<Self> {
        let mut table = Self::new(config.pivot);
        for entry in &config.entries {
            table.insert(ExchangeRate::new(
                entry.from,
                entry.to,
                entry.rate,
                entry.effective_date,
            )?);
        }
        Ok(table)
    }

    /// Adds a rate. On equal effective dates the last inserted rate wins.
    pub fn insert(&mut self, rate: ExchangeRate) {
        self.rates.push(rate);
    }

    /// Pivot currency used for triangulation.
    #[must_use]
    pub const fn pivot(&self) -> Currency {
        self.pivot
    }

    /// Number of stored rates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no rate is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Finds the most recent rate on or before the given date.
    fn find_best(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<&ExchangeRate> {
        self.rates
            .iter()
            .filter(|r| r.from == from && r.to == to && r.effective_date <= date)
            .max_by_key(|r| r.effective_date)
    }
}

impl RateProvider for RateTable {
    fn find_rate(&self, from: Currency, to: Currency, date: NaiveDate) -> MoneyResult<ResolvedRate> {
        if from == to {
            return Ok(ResolvedRate {
                rate: ExchangeRate::identity(from, date),
                method: RateLookupMethod::Direct,
            });
        }

        if let Some(rate) = self.find_best(from, to, date) {
            return Ok(ResolvedRate {
                rate: *rate,
                method: RateLookupMethod::Direct,
            });
        }

        if from != self.pivot && to != self.pivot {
            let to_pivot = self.find_best(from, self.pivot, date);
            let from_pivot = self.find_best(self.pivot, to, date);

            if let (Some(first), Some(second)) = (to_pivot, from_pivot) {
                return Ok(ResolvedRate {
                    rate: first.chain(second)?,
                    method: RateLookupMethod::Triangulated,
                });
            }
        }

        Err(MoneyError::RateNotFound {
            from: from.code().to_string(),
            to: to.code().to_string(),
        })
    }
}
