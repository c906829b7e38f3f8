//! Application configuration management.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::{Currency, Decimal};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
    /// Exchange rate table configuration.
    #[serde(default)]
    pub rates: RatesConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "tally=info".to_string()
}

/// Exchange rate table configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Currency used to triangulate pairs with no direct rate.
    #[serde(default = "default_pivot")]
    pub pivot: Currency,
    /// Known rates.
    #[serde(default)]
    pub entries: Vec<RateEntry>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            pivot: default_pivot(),
            entries: Vec::new(),
        }
    }
}

fn default_pivot() -> Currency {
    Currency::USD
}

/// A configured exchange rate: 1 `from` = `rate` `to`.
#[derive(Debug, Clone, Deserialize)]
pub struct RateEntry {
    /// Source currency.
    pub from: Currency,
    /// Target currency.
    pub to: Currency,
    /// Rate, written as a decimal string.
    pub rate: Decimal,
    /// Date from which the rate applies.
    pub effective_date: NaiveDate,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `TALLY__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }

    /// Loads configuration from a TOML document, with environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or a value fails validation.
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("TALLY").separator("__")
}
