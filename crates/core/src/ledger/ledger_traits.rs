//! Ledger repository and service traits.
//!
//! The ledger has no public mutation API: entries are appended only by
//! the trading repository inside its settlement transaction.

use super::ledger_model::LedgerEntry;
use crate::errors::Result;

/// Trait defining the contract for Ledger repository operations.
pub trait LedgerRepositoryTrait: Send + Sync {
    /// The user's complete trade history, ordered by execution time with
    /// ties broken by the store-assigned id, oldest first.
    fn history_for_user(&self, user_id: &str) -> Result<Vec<LedgerEntry>>;
}

/// Trait defining the contract for Ledger service operations.
pub trait LedgerServiceTrait: Send + Sync {
    /// The user's complete trade history, oldest first.
    fn history(&self, user_id: &str) -> Result<Vec<LedgerEntry>>;
}
