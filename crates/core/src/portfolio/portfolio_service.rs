//! Portfolio service: joins cash, holdings, and live quotes into one view.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use rust_decimal::Decimal;

use paperfolio_market_data::QuoteProvider;

use super::portfolio_model::{PortfolioSummary, Position, PositionQuote};
use super::portfolio_traits::PortfolioServiceTrait;
use crate::errors::Result;
use crate::holdings::HoldingsServiceTrait;
use crate::money::round_cash;
use crate::users::UserRepositoryTrait;

/// Service assembling the portfolio summary.
pub struct PortfolioService {
    users: Arc<dyn UserRepositoryTrait>,
    holdings: Arc<dyn HoldingsServiceTrait>,
    quotes: Arc<dyn QuoteProvider>,
}

impl PortfolioService {
    /// Creates a new PortfolioService instance.
    pub fn new(
        users: Arc<dyn UserRepositoryTrait>,
        holdings: Arc<dyn HoldingsServiceTrait>,
        quotes: Arc<dyn QuoteProvider>,
    ) -> Self {
        Self {
            users,
            holdings,
            quotes,
        }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn summary(&self, user_id: &str) -> Result<PortfolioSummary> {
        let user = self.users.get_by_id(user_id)?;
        let holdings = self.holdings.current_holdings(user_id)?;

        let quotes = join_all(
            holdings
                .iter()
                .map(|holding| self.quotes.get_latest_quote(&holding.symbol)),
        )
        .await;

        let mut positions = Vec::with_capacity(holdings.len());
        let mut missing_quotes = Vec::new();
        let mut holdings_value = Decimal::ZERO;

        for (holding, quote) in holdings.into_iter().zip(quotes) {
            match quote {
                Ok(quote) => {
                    let market_value = round_cash(quote.price * Decimal::from(holding.shares));
                    holdings_value += market_value;
                    positions.push(Position {
                        symbol: holding.symbol,
                        shares: holding.shares,
                        quote: Some(PositionQuote {
                            name: quote.name,
                            unit_price: quote.price,
                            market_value,
                        }),
                    });
                }
                Err(err) => {
                    log::warn!("No quote for held symbol {}: {}", holding.symbol, err);
                    missing_quotes.push(holding.symbol.clone());
                    positions.push(Position {
                        symbol: holding.symbol,
                        shares: holding.shares,
                        quote: None,
                    });
                }
            }
        }

        let grand_total = round_cash(user.cash_balance + holdings_value);
        Ok(PortfolioSummary {
            positions,
            cash_balance: user.cash_balance,
            holdings_value,
            grand_total,
            missing_quotes,
        })
    }
}
