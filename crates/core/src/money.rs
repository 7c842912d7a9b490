//! Decimal helpers for cash amounts.
//!
//! All money in the system is `rust_decimal::Decimal`, never floating
//! point. Trade totals and cash balances are kept at [`CASH_SCALE`]
//! decimal places; quoted unit prices keep whatever precision the
//! provider reports.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::CASH_SCALE;

/// Round an amount to the cash scale using conventional money rounding
/// (midpoints away from zero, so 0.005 becomes 0.01).
pub fn round_cash(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CASH_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
