//! Portfolio view models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Live pricing attached to a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionQuote {
    pub name: Option<String>,
    pub unit_price: Decimal,
    /// Unit price times shares held, at the cash scale
    pub market_value: Decimal,
}

/// One held symbol, with pricing when a quote was available.
///
/// `quote` is `None` when the provider could not price the symbol; the
/// position still appears so the user sees what they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub shares: i64,
    pub quote: Option<PositionQuote>,
}

/// The full portfolio page: positions, cash, and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub positions: Vec<Position>,
    pub cash_balance: Decimal,
    /// Sum of the market values of priced positions
    pub holdings_value: Decimal,
    /// Cash plus priced holdings
    pub grand_total: Decimal,
    /// Symbols held but not priced; their value is absent from the totals
    pub missing_quotes: Vec<String>,
}
