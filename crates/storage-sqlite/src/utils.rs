//! Utility functions for SQLite storage operations.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a money column stored as text into a Decimal, with a fallback
/// for scientific notation by parsing as f64 first.
///
/// Rows written by this crate always hold plain decimal strings; the
/// fallback covers data imported from other tools. Unparseable values
/// are logged and read as zero rather than poisoning the whole query.
pub fn parse_decimal_text(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(parsed) => parsed,
        Err(decimal_err) => match f64::from_str(value) {
            Ok(float_val) => match Decimal::from_f64(float_val) {
                Some(parsed) => parsed,
                None => {
                    log::error!(
                        "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                        field_name,
                        value,
                        float_val
                    );
                    Decimal::ZERO
                }
            },
            Err(float_err) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name,
                    value,
                    decimal_err,
                    float_err
                );
                Decimal::ZERO
            }
        },
    }
}
