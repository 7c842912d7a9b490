//! Trading domain models: order input, the trade plan, and settlement math.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, TradeError, ValidationError};
use crate::ledger::{LedgerEntry, TradeAction};
use crate::money::round_cash;

/// Largest whole-number share count a JSON float can carry without loss.
const MAX_FLOAT_SHARES: f64 = 9_007_199_254_740_992.0; // 2^53

/// Raw share count as submitted by a client.
///
/// HTML forms post strings, JSON clients post numbers, and some post
/// floats; all three arrive here and are vetted by [`parse_share_count`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShareCountInput {
    Count(i64),
    Fractional(f64),
    Text(String),
}

impl From<i64> for ShareCountInput {
    fn from(count: i64) -> Self {
        ShareCountInput::Count(count)
    }
}

impl From<&str> for ShareCountInput {
    fn from(text: &str) -> Self {
        ShareCountInput::Text(text.to_string())
    }
}

impl From<String> for ShareCountInput {
    fn from(text: String) -> Self {
        ShareCountInput::Text(text)
    }
}

fn invalid_share_count(got: impl std::fmt::Display) -> Error {
    Error::Trade(TradeError::InvalidShareCount(format!(
        "must be a positive whole number (got '{}')",
        got
    )))
}

/// Validates a raw share count and returns it as a positive integer.
///
/// Rejected inputs: zero, negatives, fractions, non-numeric text, and
/// floats too large to represent a whole number exactly.
pub fn parse_share_count(input: &ShareCountInput) -> Result<i64> {
    match input {
        ShareCountInput::Count(count) => {
            if *count > 0 {
                Ok(*count)
            } else {
                Err(invalid_share_count(count))
            }
        }
        ShareCountInput::Fractional(value) => {
            if value.is_finite()
                && value.fract() == 0.0
                && *value >= 1.0
                && *value <= MAX_FLOAT_SHARES
            {
                Ok(*value as i64)
            } else {
                Err(invalid_share_count(value))
            }
        }
        ShareCountInput::Text(text) => {
            let trimmed = text.trim();
            match trimmed.parse::<i64>() {
                Ok(count) if count > 0 => Ok(count),
                _ => Err(invalid_share_count(trimmed)),
            }
        }
    }
}

/// A fully validated order, priced and ready to settle.
///
/// `shares` is always positive; the direction lives in `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePlan {
    pub user_id: String,
    pub symbol: String,
    pub shares: i64,
    pub unit_price: Decimal,
    pub action: TradeAction,
}

/// Outcome of applying a plan to a user's balances, before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSettlement {
    pub total_value: Decimal,
    pub new_cash_balance: Decimal,
    pub signed_shares: i64,
}

/// A settled and persisted trade, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeExecution {
    pub transaction: LedgerEntry,
    pub new_cash_balance: Decimal,
    pub new_shares_held: i64,
}

impl TradePlan {
    /// Builds a plan from validated parts.
    ///
    /// The share count and price must already be positive; this is the
    /// last gate before settlement math runs.
    pub fn new(
        user_id: &str,
        symbol: &str,
        shares: i64,
        unit_price: Decimal,
        action: TradeAction,
    ) -> Result<Self> {
        if shares <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "trade plan requires a positive share count, got {}",
                shares
            ))));
        }
        if unit_price <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "trade plan requires a positive unit price, got {}",
                unit_price
            ))));
        }
        Ok(Self {
            user_id: user_id.to_string(),
            symbol: symbol.to_string(),
            shares,
            unit_price,
            action,
        })
    }

    /// Total cash this order moves, rounded to the cash scale.
    pub fn total_value(&self) -> Decimal {
        round_cash(self.unit_price * Decimal::from(self.shares))
    }

    /// Share delta this order applies to the holding.
    pub fn signed_shares(&self) -> i64 {
        self.shares * self.action.share_sign()
    }

    /// Settles the plan against the user's balances.
    pub fn settle(&self, cash_balance: Decimal, shares_held: i64) -> Result<TradeSettlement> {
        match self.action {
            TradeAction::Buy => self.settle_buy(cash_balance),
            TradeAction::Sell => self.settle_sell(cash_balance, shares_held),
        }
    }

    /// Settles a buy: the total may equal the cash balance exactly, but
    /// never exceed it.
    pub fn settle_buy(&self, cash_balance: Decimal) -> Result<TradeSettlement> {
        let total = self.total_value();
        if total > cash_balance {
            return Err(Error::Trade(TradeError::InsufficientFunds {
                required: total,
                available: cash_balance,
            }));
        }
        Ok(TradeSettlement {
            total_value: total,
            new_cash_balance: round_cash(cash_balance - total),
            signed_shares: self.shares,
        })
    }

    /// Settles a sell: the full position may be sold, but not more.
    pub fn settle_sell(&self, cash_balance: Decimal, shares_held: i64) -> Result<TradeSettlement> {
        if self.shares > shares_held {
            return Err(Error::Trade(TradeError::InsufficientShares {
                symbol: self.symbol.clone(),
                requested: self.shares,
                held: shares_held,
            }));
        }
        let total = self.total_value();
        Ok(TradeSettlement {
            total_value: total,
            new_cash_balance: round_cash(cash_balance + total),
            signed_shares: -self.shares,
        })
    }
}
