//! Quote provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for quote sources.
///
/// Implement this trait to plug in a new market data source. The trading
/// engine only ever talks to this trait, so tests can substitute a stub
/// provider with fixed prices.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO_CHART". Used for logging
    /// and as the `source` field on returned quotes.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a symbol.
    ///
    /// Implementations normalize the symbol before lookup. An unknown
    /// symbol returns [`MarketDataError::SymbolNotFound`]; any transport
    /// or provider failure returns the corresponding typed error.
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}
