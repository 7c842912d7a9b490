use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalize a user-entered symbol for lookup: trim whitespace and
/// uppercase, so `aapl` and `AAPL ` resolve to the same instrument.
///
/// Returns an empty string for whitespace-only input; callers treat that
/// as an unknown symbol without hitting the provider.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// A point-in-time price for a stock symbol.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// Normalized symbol the quote belongs to
    pub symbol: String,

    /// Display name of the instrument, when the provider knows one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Current price (required, always positive)
    pub price: Decimal,

    /// Quote currency
    pub currency: String,

    /// Timestamp of the quote
    pub timestamp: DateTime<Utc>,

    /// Source of the quote (YAHOO_CHART, STUB, etc.)
    pub source: String,
}

impl Quote {
    /// Create a quote with the minimal required fields.
    pub fn new(
        symbol: String,
        price: Decimal,
        currency: String,
        timestamp: DateTime<Utc>,
        source: String,
    ) -> Self {
        Self {
            symbol,
            name: None,
            price,
            currency,
            timestamp,
            source,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("aapl"), "AAPL");
        assert_eq!(normalize_symbol("  msft  "), "MSFT");
        assert_eq!(normalize_symbol("BRK.B"), "BRK.B");
        assert_eq!(normalize_symbol("   "), "");
    }

    #[test]
    fn test_quote_new() {
        let quote = Quote::new(
            "AAPL".to_string(),
            dec!(150.25),
            "USD".to_string(),
            Utc::now(),
            "YAHOO_CHART".to_string(),
        );
        assert_eq!(quote.price, dec!(150.25));
        assert_eq!(quote.currency, "USD");
        assert!(quote.name.is_none());
    }

    #[test]
    fn test_quote_with_name() {
        let quote = Quote::new(
            "AAPL".to_string(),
            dec!(150.25),
            "USD".to_string(),
            Utc::now(),
            "YAHOO_CHART".to_string(),
        )
        .with_name(Some("Apple Inc.".to_string()));
        assert_eq!(quote.name.as_deref(), Some("Apple Inc."));
    }
}
