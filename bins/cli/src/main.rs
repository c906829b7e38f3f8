//! Tally command-line converter.
//!
//! Converts an amount between currencies using the rates in configuration.
//!
//! Usage: tally 12.50 EUR USD [--date 2024-01-15] [--json]

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::currency::{CurrencyService, RateLookupMethod, RateTable};
use tally_shared::{Amount, AppConfig, Currency, Decimal};

/// Convert money between currencies without floating-point error.
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Amount to convert, e.g. 12.50
    amount: String,

    /// Source currency code, e.g. EUR
    from: String,

    /// Target currency code, e.g. USD
    to: String,

    /// Date whose rate applies (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// JSON output for a conversion.
#[derive(Debug, Serialize)]
struct ConversionOutput {
    source: Amount,
    converted: Amount,
    rate: Decimal,
    method: RateLookupMethod,
    date: NaiveDate,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let table = RateTable::from_config(&config.rates).context("Invalid rate table")?;
    info!(rates = table.len(), pivot = %table.pivot(), "Rate table loaded");

    let amount = Amount::parse(&cli.amount, &cli.from)
        .with_context(|| format!("Invalid amount {} {}", cli.amount, cli.from))?;
    let to = Currency::parse(&cli.to).context("Invalid target currency")?;
    let date = cli.date.unwrap_or_else(|| Utc::now().date_naive());

    let service = CurrencyService::new(table);
    let (converted, resolved) = service.convert_resolved(&amount, to, date)?;

    if cli.json {
        let output = ConversionOutput {
            source: amount,
            converted,
            rate: resolved.rate.rate(),
            method: resolved.method,
            date,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{converted}");
    }

    Ok(())
}
