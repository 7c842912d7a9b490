//! Portfolio service trait.

use async_trait::async_trait;

use super::portfolio_model::PortfolioSummary;
use crate::errors::Result;

/// Trait defining the contract for Portfolio service operations.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Builds the user's portfolio: current positions priced at the
    /// latest quotes, cash balance, and totals.
    ///
    /// Quote failures degrade per symbol instead of failing the whole
    /// summary; unpriced symbols are listed in `missing_quotes`.
    async fn summary(&self, user_id: &str) -> Result<PortfolioSummary>;
}
