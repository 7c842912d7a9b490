//! Shared harness for the API integration tests: a router wired to a
//! throwaway database and a deterministic quote provider.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use tower::ServiceExt;

use paperfolio_market_data::{normalize_symbol, MarketDataError, Quote, QuoteProvider};
use paperfolio_server::api::app_router;
use paperfolio_server::build_state_with_provider;
use paperfolio_server::config::{AuthConfig, Config};

/// Quote provider with a fixed price table; unknown symbols come back
/// as `SymbolNotFound`.
pub struct StubQuotes {
    prices: HashMap<String, Decimal>,
}

impl StubQuotes {
    pub fn with_prices(prices: &[(&str, Decimal)]) -> Self {
        Self {
            prices: prices
                .iter()
                .map(|(symbol, price)| (symbol.to_string(), *price))
                .collect(),
        }
    }
}

#[async_trait]
impl QuoteProvider for StubQuotes {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let symbol = normalize_symbol(symbol);
        match self.prices.get(&symbol) {
            Some(price) => Ok(Quote::new(
                symbol,
                *price,
                "USD".to_string(),
                Utc::now(),
                "STUB".to_string(),
            )),
            None => Err(MarketDataError::SymbolNotFound(symbol)),
        }
    }
}

fn test_config(tmp: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        static_dir: "./dist".to_string(),
        cors_allow_origins: Vec::new(),
        request_timeout_secs: 30,
        starting_cash: dec!(10000.00),
        quote_base_url: None,
        auth: AuthConfig {
            jwt_secret: vec![7u8; 32],
            token_ttl_secs: 3600,
        },
    }
}

/// Builds the app against a fresh database. The `TempDir` must be kept
/// alive for the duration of the test.
pub async fn spawn_app() -> (Router, TempDir) {
    spawn_app_with_prices(&[
        ("AAPL", dec!(50.00)),
        ("NFLX", dec!(123.45)),
        ("MSFT", dec!(60.00)),
    ])
    .await
}

pub async fn spawn_app_with_prices(prices: &[(&str, Decimal)]) -> (Router, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&tmp);
    let provider = Arc::new(StubQuotes::with_prices(prices));
    let state = build_state_with_provider(&config, provider).await.unwrap();
    (app_router(state, &config), tmp)
}

pub fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Fires a request at the router and returns the status plus the parsed
/// JSON body (`Null` when the body is empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Registers a user and returns their access token.
pub async fn register_user(app: &Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({
        "username": username,
        "password": password,
        "passwordConfirmation": password,
    });
    let (status, json) = send(
        app,
        json_request(Method::POST, "/api/v1/auth/register", None, &body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["accessToken"].as_str().unwrap().to_string()
}

/// Submits a buy or sell order; `side` is `"buy"` or `"sell"`.
pub async fn execute_trade(
    app: &Router,
    token: &str,
    side: &str,
    symbol: &str,
    shares: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let body = serde_json::json!({ "symbol": symbol, "shares": shares });
    send(
        app,
        json_request(
            Method::POST,
            &format!("/api/v1/trades/{side}"),
            Some(token),
            &body,
        ),
    )
    .await
}
