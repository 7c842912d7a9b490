//! Holdings module - net positions derived from the ledger.

mod holdings_model;
mod holdings_service;
mod holdings_traits;

// Re-export the public interface
pub use holdings_model::{derive_from_entries, Holding};
pub use holdings_service::HoldingsService;
pub use holdings_traits::{HoldingsRepositoryTrait, HoldingsServiceTrait};
