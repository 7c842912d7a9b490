//! Holdings repository and service traits.
//!
//! The holdings table is a materialization of the ledger fold; it is
//! written only by the trading repository inside its settlement
//! transaction, so the read traits here have no mutation methods.

use super::holdings_model::Holding;
use crate::errors::Result;

/// Trait defining the contract for Holdings repository operations.
pub trait HoldingsRepositoryTrait: Send + Sync {
    /// Positions with a positive share count, sorted by symbol.
    fn current_holdings(&self, user_id: &str) -> Result<Vec<Holding>>;

    /// Every stored position row, including those at zero shares,
    /// sorted by symbol.
    fn all_positions(&self, user_id: &str) -> Result<Vec<Holding>>;

    /// Shares held of one symbol; zero when no row exists.
    fn shares_held(&self, user_id: &str, symbol: &str) -> Result<i64>;
}

/// Trait defining the contract for Holdings service operations.
pub trait HoldingsServiceTrait: Send + Sync {
    /// Positions with a positive share count, sorted by symbol.
    fn current_holdings(&self, user_id: &str) -> Result<Vec<Holding>>;

    /// Shares held of one symbol; zero when no row exists.
    fn shares_held(&self, user_id: &str, symbol: &str) -> Result<i64>;

    /// Checks the stored positions against the fold of the user's ledger.
    ///
    /// A missing row and a zero-share row are treated as equal. Any net
    /// difference is reported as a ledger drift error naming the symbols
    /// involved.
    fn verify_against_ledger(&self, user_id: &str) -> Result<()>;
}
