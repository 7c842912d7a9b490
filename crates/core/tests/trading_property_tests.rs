//! Property-based tests for trade settlement and the ledger fold.
//!
//! These tests verify that the money and position invariants hold across
//! randomly generated orders, using the `proptest` crate for test case
//! generation.

use std::collections::BTreeMap;

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use paperfolio_core::errors::{Error, TradeError};
use paperfolio_core::holdings::{derive_from_entries, Holding};
use paperfolio_core::ledger::{LedgerEntry, TradeAction};
use paperfolio_core::trading::{parse_share_count, ShareCountInput, TradePlan};

// =============================================================================
// Generators
// =============================================================================

/// A cash balance between 0.00 and 20,000.00, at cent precision.
fn arb_cash() -> impl Strategy<Value = Decimal> {
    (0i64..=2_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// A unit price between 0.01 and 1,000.00, at cent precision.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// A share count between 1 and 10,000.
fn arb_shares() -> impl Strategy<Value = i64> {
    1i64..=10_000
}

/// A short random trade sequence: (symbol index, share count, sell flag).
fn arb_trade_seq() -> impl Strategy<Value = Vec<(usize, i64, bool)>> {
    proptest::collection::vec((0usize..3, 1i64..=50, any::<bool>()), 0..=30)
}

fn entry(id: i64, symbol: &str, shares: i64) -> LedgerEntry {
    let action = if shares >= 0 {
        TradeAction::Buy
    } else {
        TradeAction::Sell
    };
    LedgerEntry {
        id,
        user_id: "u-1".to_string(),
        symbol: symbol.to_string(),
        shares,
        unit_price: Decimal::new(1000, 2),
        action,
        created_at: Utc::now().naive_utc(),
    }
}

fn buy_plan(shares: i64, price: Decimal) -> TradePlan {
    TradePlan::new("u-1", "AAPL", shares, price, TradeAction::Buy).unwrap()
}

fn sell_plan(shares: i64, price: Decimal) -> TradePlan {
    TradePlan::new("u-1", "AAPL", shares, price, TradeAction::Sell).unwrap()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Buying and then selling the same share count at the same price
    /// must restore the starting cash balance exactly.
    #[test]
    fn prop_round_trip_restores_cash(
        cash in arb_cash(),
        price in arb_price(),
        shares in arb_shares(),
    ) {
        let buy = buy_plan(shares, price);
        match buy.settle_buy(cash) {
            Ok(bought) => {
                let sell = sell_plan(shares, price);
                let sold = sell.settle_sell(bought.new_cash_balance, shares).unwrap();
                prop_assert_eq!(sold.new_cash_balance, cash);
            }
            Err(Error::Trade(TradeError::InsufficientFunds { required, available })) => {
                prop_assert!(required > available);
                prop_assert_eq!(available, cash);
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    /// A settled buy never leaves a negative cash balance, and debits
    /// exactly the order total.
    #[test]
    fn prop_buy_never_overdraws(
        cash in arb_cash(),
        price in arb_price(),
        shares in arb_shares(),
    ) {
        let plan = buy_plan(shares, price);
        if let Ok(settlement) = plan.settle_buy(cash) {
            prop_assert!(settlement.new_cash_balance >= Decimal::ZERO);
            prop_assert_eq!(settlement.new_cash_balance, cash - settlement.total_value);
            prop_assert_eq!(settlement.signed_shares, shares);
        }
    }

    /// A sell settles exactly when the position covers it, and credits
    /// exactly the order total.
    #[test]
    fn prop_sell_requires_covering_position(
        cash in arb_cash(),
        price in arb_price(),
        shares in arb_shares(),
        held in 0i64..=10_000,
    ) {
        let plan = sell_plan(shares, price);
        match plan.settle_sell(cash, held) {
            Ok(settlement) => {
                prop_assert!(shares <= held);
                prop_assert_eq!(settlement.new_cash_balance, cash + settlement.total_value);
                prop_assert_eq!(settlement.signed_shares, -shares);
            }
            Err(Error::Trade(TradeError::InsufficientShares { requested, held: reported, .. })) => {
                prop_assert!(shares > held);
                prop_assert_eq!(requested, shares);
                prop_assert_eq!(reported, held);
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    /// Order totals never carry more precision than the cash scale.
    #[test]
    fn prop_total_value_stays_at_cash_scale(
        price in arb_price(),
        shares in arb_shares(),
    ) {
        let plan = buy_plan(shares, price);
        let total = plan.total_value();
        prop_assert!(total.scale() <= 2, "total {} has scale {}", total, total.scale());
        prop_assert!(total > Decimal::ZERO);
    }

    /// Folding the ledger reproduces the position reached by applying the
    /// trades one at a time, and no intermediate position goes negative.
    #[test]
    fn prop_ledger_fold_matches_running_positions(seq in arb_trade_seq()) {
        let symbols = ["AAPL", "MSFT", "NFLX"];
        let mut held: BTreeMap<&str, i64> = BTreeMap::new();
        let mut entries = Vec::new();

        for (ix, (sym_ix, count, is_sell)) in seq.into_iter().enumerate() {
            let symbol = symbols[sym_ix];
            let net = held.entry(symbol).or_insert(0);
            // Sells are capped at the position, as the engine enforces.
            let delta = if is_sell && *net > 0 {
                -count.min(*net)
            } else {
                count
            };
            *net += delta;
            entries.push(entry(ix as i64 + 1, symbol, delta));
        }

        prop_assert!(held.values().all(|net| *net >= 0));

        let expected: Vec<Holding> = held
            .iter()
            .map(|(symbol, net)| Holding::new("u-1", *symbol, *net))
            .collect();
        prop_assert_eq!(derive_from_entries("u-1", &entries), expected);
    }

    /// Integer share counts parse exactly when positive, whether they
    /// arrive as numbers or as form text.
    #[test]
    fn prop_share_count_parses_positive_integers(count in any::<i64>()) {
        let as_number = parse_share_count(&ShareCountInput::Count(count));
        let as_text = parse_share_count(&ShareCountInput::Text(count.to_string()));
        if count > 0 {
            prop_assert_eq!(as_number.unwrap(), count);
            prop_assert_eq!(as_text.unwrap(), count);
        } else {
            prop_assert!(as_number.is_err());
            prop_assert!(as_text.is_err());
        }
    }
}
