//! Trading service: prices an order through the quote provider and hands
//! the settled plan to the repository.

use std::sync::Arc;

use async_trait::async_trait;

use paperfolio_market_data::{normalize_symbol, QuoteProvider};

use super::trading_model::{parse_share_count, ShareCountInput, TradeExecution, TradePlan};
use super::trading_traits::{TradingRepositoryTrait, TradingServiceTrait};
use crate::errors::{Error, QuoteError, Result};
use crate::ledger::TradeAction;

/// Service that turns raw order input into executed trades.
pub struct TradingService {
    repository: Arc<dyn TradingRepositoryTrait>,
    quotes: Arc<dyn QuoteProvider>,
}

impl TradingService {
    /// Creates a new TradingService instance.
    pub fn new(repository: Arc<dyn TradingRepositoryTrait>, quotes: Arc<dyn QuoteProvider>) -> Self {
        Self { repository, quotes }
    }

    /// Shared order path: validate the share count, price the symbol,
    /// then settle. The share count is checked first so a malformed
    /// order never reaches the quote provider.
    async fn place_order(
        &self,
        user_id: &str,
        symbol: &str,
        shares: ShareCountInput,
        action: TradeAction,
    ) -> Result<TradeExecution> {
        let share_count = parse_share_count(&shares)?;

        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(Error::Quote(QuoteError::SymbolNotFound(symbol)));
        }

        let quote = self.quotes.get_latest_quote(&symbol).await?;
        let plan = TradePlan::new(user_id, &quote.symbol, share_count, quote.price, action)?;

        log::debug!(
            "Placing {} order for user {}: {} x {} @ {}",
            plan.action,
            plan.user_id,
            plan.shares,
            plan.symbol,
            plan.unit_price
        );

        self.repository.execute_trade(plan).await
    }
}

#[async_trait]
impl TradingServiceTrait for TradingService {
    async fn buy(
        &self,
        user_id: &str,
        symbol: &str,
        shares: ShareCountInput,
    ) -> Result<TradeExecution> {
        self.place_order(user_id, symbol, shares, TradeAction::Buy).await
    }

    async fn sell(
        &self,
        user_id: &str,
        symbol: &str,
        shares: ShareCountInput,
    ) -> Result<TradeExecution> {
        self.place_order(user_id, symbol, shares, TradeAction::Sell).await
    }
}
