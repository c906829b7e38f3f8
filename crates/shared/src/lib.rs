//! Fixed-point money types, errors, and configuration for Tally.
//!
//! This crate provides the value types used across all other crates:
//! - `Decimal`: exact integer-scaled decimal, never floating-point
//! - `Currency`: currency code with its minor-unit precision
//! - `Amount`: a decimal bound to a currency at exactly its precision
//! - Money error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{MoneyError, MoneyResult};
pub use types::{Amount, Currency, Decimal};
