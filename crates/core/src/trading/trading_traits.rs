//! Trading repository and service traits.

use async_trait::async_trait;

use super::trading_model::{ShareCountInput, TradeExecution, TradePlan};
use crate::errors::Result;

/// Trait defining the contract for trade settlement against the store.
#[async_trait]
pub trait TradingRepositoryTrait: Send + Sync {
    /// Settles a priced plan in a single transaction: re-reads the user's
    /// balances, applies the plan's settlement math, appends the ledger
    /// entry, and updates cash and the holding row together. Either every
    /// write lands or none do.
    ///
    /// Funds and share-count checks run inside the transaction, so two
    /// concurrent orders cannot both spend the same cash.
    async fn execute_trade(&self, plan: TradePlan) -> Result<TradeExecution>;
}

/// Trait defining the contract for Trading service operations.
#[async_trait]
pub trait TradingServiceTrait: Send + Sync {
    /// Buys shares of a symbol at the current quoted price.
    async fn buy(
        &self,
        user_id: &str,
        symbol: &str,
        shares: ShareCountInput,
    ) -> Result<TradeExecution>;

    /// Sells shares of a symbol at the current quoted price.
    async fn sell(
        &self,
        user_id: &str,
        symbol: &str,
        shares: ShareCountInput,
    ) -> Result<TradeExecution>;
}
