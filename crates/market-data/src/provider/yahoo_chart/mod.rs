//! Yahoo Finance chart provider implementation.
//!
//! Fetches the latest price for a symbol from the public Yahoo Finance
//! chart endpoint.
//!
//! # API Endpoint
//!
//! - Latest quote: `{base_url}/v8/finance/chart/{symbol}`
//!
//! # Response Format
//!
//! The endpoint wraps its payload in a `chart` envelope with either a
//! `result` array (whose first element carries a `meta` block with the
//! regular market price) or an `error` object. Unknown symbols come back
//! as HTTP 404 with an error body.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use log::debug;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use urlencoding::encode;

use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{normalize_symbol, Quote};
use crate::provider::QuoteProvider;

const BASE_URL: &str = "https://query1.finance.yahoo.com";
const PROVIDER_ID: &str = "YAHOO_CHART";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Yahoo rejects requests without a browser-looking user agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Decimals kept on a quoted price.
const PRICE_PRECISION: u32 = 6;

/// Envelope of the chart endpoint.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    /// Present on success, first element carries the meta block
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    /// Present on failure, e.g. code "Not Found" for unknown symbols
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    regular_market_time: Option<i64>,
}

/// Quote provider backed by the Yahoo Finance chart endpoint.
///
/// # Example
///
/// ```ignore
/// let provider = YahooChartProvider::new();
/// let quote = provider.get_latest_quote("AAPL").await?;
/// ```
pub struct YahooChartProvider {
    client: Client,
    base_url: String,
}

impl YahooChartProvider {
    /// Create a provider against the public Yahoo endpoint.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    /// Create a provider against a custom base URL.
    ///
    /// Tests point this at a local stub server.
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch and unwrap the chart meta block for a normalized symbol.
    async fn fetch_meta(&self, symbol: &str) -> Result<ChartMeta, MarketDataError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, encode(symbol));

        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            status if !status.is_success() => {
                return Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("HTTP error: {}", status),
                });
            }
            _ => {}
        }

        let body = response.text().await?;
        let chart: ChartResponse =
            serde_json::from_str(&body).map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse chart response: {}", e),
            })?;

        if let Some(error) = chart.chart.error {
            if error.code.eq_ignore_ascii_case("not found") {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("{}: {}", error.code, error.description),
            });
        }

        chart
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|r| r.meta)
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }

    /// Convert a wire price into a Decimal, rejecting non-positive values.
    fn convert_price(raw: f64, symbol: &str) -> Result<Decimal, MarketDataError> {
        if raw <= 0.0 {
            return Err(MarketDataError::ValidationFailed {
                message: format!("Non-positive market price {} for {}", raw, symbol),
            });
        }

        Decimal::from_f64_retain(raw)
            .map(|p| p.round_dp(PRICE_PRECISION))
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Failed to convert price {} to Decimal", raw),
            })
    }
}

impl Default for YahooChartProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for YahooChartProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(MarketDataError::SymbolNotFound(symbol));
        }

        debug!("Fetching latest quote for {} from Yahoo chart", symbol);

        let meta = self.fetch_meta(&symbol).await?;

        let raw_price =
            meta.regular_market_price
                .ok_or_else(|| MarketDataError::ValidationFailed {
                    message: format!("No market price for {}", symbol),
                })?;
        let price = Self::convert_price(raw_price, &symbol)?;

        let timestamp = meta
            .regular_market_time
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or_else(Utc::now);

        let currency = meta.currency.unwrap_or_else(|| "USD".to_string());
        let name = meta.long_name.or(meta.short_name);
        let quoted_symbol = meta.symbol.unwrap_or(symbol);

        Ok(
            Quote::new(quoted_symbol, price, currency, timestamp, PROVIDER_ID.to_string())
                .with_name(name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_id() {
        let provider = YahooChartProvider::new();
        assert_eq!(provider.id(), "YAHOO_CHART");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let provider = YahooChartProvider::with_base_url("http://localhost:9999/".to_string());
        assert_eq!(provider.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_chart_response_deserialization() {
        let json = r#"{
            "chart": {
                "result": [
                    {
                        "meta": {
                            "currency": "USD",
                            "symbol": "AAPL",
                            "shortName": "Apple Inc.",
                            "regularMarketPrice": 150.25,
                            "regularMarketTime": 1640000000
                        }
                    }
                ],
                "error": null
            }
        }"#;

        let chart: ChartResponse = serde_json::from_str(json).unwrap();
        let meta = chart.chart.result.unwrap().remove(0).meta;
        assert_eq!(meta.symbol.as_deref(), Some("AAPL"));
        assert_eq!(meta.regular_market_price, Some(150.25));
        assert_eq!(meta.short_name.as_deref(), Some("Apple Inc."));
    }

    #[test]
    fn test_chart_response_with_error() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": {
                    "code": "Not Found",
                    "description": "No data found, symbol may be delisted"
                }
            }
        }"#;

        let chart: ChartResponse = serde_json::from_str(json).unwrap();
        assert!(chart.chart.result.is_none());
        assert_eq!(chart.chart.error.unwrap().code, "Not Found");
    }

    #[test]
    fn test_chart_meta_tolerates_missing_fields() {
        let json = r#"{
            "chart": {
                "result": [{ "meta": { "regularMarketPrice": 12.5 } }]
            }
        }"#;

        let chart: ChartResponse = serde_json::from_str(json).unwrap();
        let meta = chart.chart.result.unwrap().remove(0).meta;
        assert!(meta.currency.is_none());
        assert_eq!(meta.regular_market_price, Some(12.5));
    }

    #[test]
    fn test_convert_price() {
        assert_eq!(
            YahooChartProvider::convert_price(150.25, "AAPL").unwrap(),
            dec!(150.25)
        );
    }

    #[test]
    fn test_convert_price_rejects_non_positive() {
        assert!(matches!(
            YahooChartProvider::convert_price(0.0, "AAPL"),
            Err(MarketDataError::ValidationFailed { .. })
        ));
        assert!(matches!(
            YahooChartProvider::convert_price(-1.0, "AAPL"),
            Err(MarketDataError::ValidationFailed { .. })
        ));
    }
}
