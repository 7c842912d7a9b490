use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Cash balance granted to a newly registered user unless configured otherwise.
pub const DEFAULT_STARTING_CASH: Decimal = dec!(10000.00);

/// Decimal places kept on cash balances and trade totals.
pub const CASH_SCALE: u32 = 2;
