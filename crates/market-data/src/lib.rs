//! Paperfolio Market Data Crate
//!
//! Provider-agnostic stock quote fetching for the Paperfolio trading
//! application.
//!
//! # Overview
//!
//! This crate exposes:
//! - [`Quote`]: a point-in-time price for a stock symbol
//! - [`QuoteProvider`]: the trait a quote source implements
//! - [`YahooChartProvider`]: an HTTP provider backed by the Yahoo
//!   Finance chart endpoint
//! - [`MarketDataError`]: typed failures so callers can tell an unknown
//!   symbol apart from a provider outage
//!
//! Trades always settle against a price fetched through a
//! [`QuoteProvider`] at execution time. Provider failures surface as
//! typed errors instead of default values, so a quote outage can never
//! turn into a zero-priced trade.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{normalize_symbol, Quote};
pub use provider::yahoo_chart::YahooChartProvider;
pub use provider::QuoteProvider;
