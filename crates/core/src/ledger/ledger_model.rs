//! Ledger domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const TRADE_ACTION_BUY: &str = "BUY";
pub const TRADE_ACTION_SELL: &str = "SELL";

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => TRADE_ACTION_BUY,
            TradeAction::Sell => TRADE_ACTION_SELL,
        }
    }

    /// Sign applied to the share count when the trade is recorded in the
    /// ledger: buys add shares, sells remove them.
    pub fn share_sign(&self) -> i64 {
        match self {
            TradeAction::Buy => 1,
            TradeAction::Sell => -1,
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            TRADE_ACTION_BUY => Ok(TradeAction::Buy),
            TRADE_ACTION_SELL => Ok(TradeAction::Sell),
            _ => Err(format!("Unknown trade action: {}", s)),
        }
    }
}

/// A single executed trade, immutable once written.
///
/// `shares` is signed: positive for buys, negative for sells. The sign
/// always matches `action`, and the fold of `shares` per symbol is the
/// defining value of a user's holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Store-assigned sequence number; orders entries within a timestamp
    pub id: i64,
    pub user_id: String,
    pub symbol: String,
    /// Signed share delta (positive = buy, negative = sell)
    pub shares: i64,
    /// Per-share price at execution time
    pub unit_price: Decimal,
    pub action: TradeAction,
    pub created_at: NaiveDateTime,
}

impl LedgerEntry {
    /// Total cash moved by this entry, always positive.
    pub fn total_value(&self) -> Decimal {
        crate::money::round_cash(self.unit_price * Decimal::from(self.shares.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trade_action_round_trip() {
        assert_eq!(TradeAction::Buy.as_str(), "BUY");
        assert_eq!(TradeAction::Sell.as_str(), "SELL");
        assert_eq!("BUY".parse::<TradeAction>().unwrap(), TradeAction::Buy);
        assert_eq!("SELL".parse::<TradeAction>().unwrap(), TradeAction::Sell);
        assert!("HOLD".parse::<TradeAction>().is_err());
    }

    #[test]
    fn test_trade_action_share_sign() {
        assert_eq!(TradeAction::Buy.share_sign(), 1);
        assert_eq!(TradeAction::Sell.share_sign(), -1);
    }

    #[test]
    fn test_entry_total_value_uses_absolute_shares() {
        let entry = LedgerEntry {
            id: 1,
            user_id: "u-1".to_string(),
            symbol: "AAPL".to_string(),
            shares: -10,
            unit_price: dec!(150.00),
            action: TradeAction::Sell,
            created_at: Utc::now().naive_utc(),
        };
        assert_eq!(entry.total_value(), dec!(1500.00));
    }

    #[test]
    fn test_trade_action_serde_uses_screaming_case() {
        assert_eq!(
            serde_json::to_string(&TradeAction::Buy).unwrap(),
            "\"BUY\""
        );
        let action: TradeAction = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(action, TradeAction::Sell);
    }
}
