//! Paperfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Paperfolio: user
//! credential management, the trade ledger, holdings aggregation, and the
//! trading engine that settles buy/sell orders against a user's cash
//! balance. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod holdings;
pub mod ledger;
pub mod money;
pub mod portfolio;
pub mod trading;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
