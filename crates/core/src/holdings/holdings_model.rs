//! Holdings domain models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ledger::LedgerEntry;

/// A user's net position in one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub user_id: String,
    pub symbol: String,
    pub shares: i64,
}

impl Holding {
    pub fn new(user_id: impl Into<String>, symbol: impl Into<String>, shares: i64) -> Self {
        Self {
            user_id: user_id.into(),
            symbol: symbol.into(),
            shares,
        }
    }
}

/// Folds a trade history into net positions, one per symbol, sorted by
/// symbol.
///
/// Symbols whose trades net to zero are kept in the result so it can be
/// compared against the stored holdings rows; display layers filter them
/// out.
pub fn derive_from_entries(user_id: &str, entries: &[LedgerEntry]) -> Vec<Holding> {
    let mut net: BTreeMap<&str, i64> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.user_id == user_id) {
        *net.entry(entry.symbol.as_str()).or_insert(0) += entry.shares;
    }
    net.into_iter()
        .map(|(symbol, shares)| Holding::new(user_id, symbol, shares))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TradeAction;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn entry(user_id: &str, symbol: &str, shares: i64) -> LedgerEntry {
        let action = if shares >= 0 {
            TradeAction::Buy
        } else {
            TradeAction::Sell
        };
        LedgerEntry {
            id: 0,
            user_id: user_id.to_string(),
            symbol: symbol.to_string(),
            shares,
            unit_price: dec!(10.00),
            action,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_derive_nets_trades_per_symbol() {
        let entries = vec![
            entry("u-1", "AAPL", 10),
            entry("u-1", "NFLX", 3),
            entry("u-1", "AAPL", -4),
        ];
        let holdings = derive_from_entries("u-1", &entries);
        assert_eq!(
            holdings,
            vec![
                Holding::new("u-1", "AAPL", 6),
                Holding::new("u-1", "NFLX", 3),
            ]
        );
    }

    #[test]
    fn test_derive_keeps_zero_net_symbols() {
        let entries = vec![entry("u-1", "AAPL", 5), entry("u-1", "AAPL", -5)];
        let holdings = derive_from_entries("u-1", &entries);
        assert_eq!(holdings, vec![Holding::new("u-1", "AAPL", 0)]);
    }

    #[test]
    fn test_derive_ignores_other_users() {
        let entries = vec![entry("u-1", "AAPL", 5), entry("u-2", "AAPL", 7)];
        let holdings = derive_from_entries("u-1", &entries);
        assert_eq!(holdings, vec![Holding::new("u-1", "AAPL", 5)]);
    }

    #[test]
    fn test_derive_sorts_by_symbol() {
        let entries = vec![
            entry("u-1", "NFLX", 1),
            entry("u-1", "AAPL", 1),
            entry("u-1", "GOOG", 1),
        ];
        let symbols: Vec<_> = derive_from_entries("u-1", &entries)
            .into_iter()
            .map(|h| h.symbol)
            .collect();
        assert_eq!(symbols, vec!["AAPL", "GOOG", "NFLX"]);
    }
}
