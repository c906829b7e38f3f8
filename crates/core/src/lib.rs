//! Core conversion logic for Tally.
//!
//! This crate contains pure conversion logic with ZERO I/O dependencies.
//! Money value types live in `tally-shared`; this crate adds exchange rates,
//! rate lookup, and the multiply-then-rescale conversion.
//!
//! # Modules
//!
//! - `currency` - Exchange rates, rate lookup, and conversion

pub mod currency;
