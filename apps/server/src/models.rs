//! Wire models for the HTTP API.
//!
//! Request bodies convert into core input models; responses are built
//! from core domain models. The `ToSchema` derives feed the OpenAPI
//! document served at `/openapi.json`.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use paperfolio_core::ledger::LedgerEntry;
use paperfolio_core::portfolio::{PortfolioSummary, Position};
use paperfolio_core::trading::{ShareCountInput, TradeExecution};
use paperfolio_core::users as core_users;
use paperfolio_market_data::Quote;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
}

impl From<RegisterRequest> for core_users::RegisterInput {
    fn from(r: RegisterRequest) -> Self {
        Self {
            username: r.username,
            password: r.password,
            password_confirmation: r.password_confirmation,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl From<LoginRequest> for core_users::Credentials {
    fn from(r: LoginRequest) -> Self {
        Self {
            username: r.username,
            password: r.password,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

impl From<ChangePasswordRequest> for core_users::ChangePasswordInput {
    fn from(r: ChangePasswordRequest) -> Self {
        Self {
            current_password: r.current_password,
            new_password: r.new_password,
            new_password_confirmation: r.new_password_confirmation,
        }
    }
}

/// Public view of a user. The password hash never leaves the server.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[schema(value_type = f64)]
    pub cash_balance: Decimal,
    pub created_at: NaiveDateTime,
}

impl From<core_users::User> for UserProfile {
    fn from(u: core_users::User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            cash_balance: u.cash_balance,
            created_at: u.created_at,
        }
    }
}

/// Login/registration response carrying the bearer token.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserProfile,
}

impl SessionResponse {
    pub fn new(access_token: String, expires_in: u64, user: UserProfile) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub currency: String,
    pub as_of: DateTime<Utc>,
    pub source: String,
}

impl From<Quote> for QuoteResponse {
    fn from(q: Quote) -> Self {
        Self {
            symbol: q.symbol,
            name: q.name,
            price: q.price,
            currency: q.currency,
            as_of: q.timestamp,
            source: q.source,
        }
    }
}

/// Order submission: shares may arrive as a JSON number or a string,
/// both must describe a positive whole number.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub symbol: String,
    #[schema(value_type = Object)]
    pub shares: ShareCountInput,
}

/// One settled ledger entry as shown to clients.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: i64,
    pub symbol: String,
    /// Signed: positive for buys, negative for sells.
    pub shares: i64,
    #[schema(value_type = f64)]
    pub unit_price: Decimal,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
    pub action: String,
    pub created_at: NaiveDateTime,
}

impl From<LedgerEntry> for TransactionDto {
    fn from(entry: LedgerEntry) -> Self {
        let total_value = entry.total_value();
        Self {
            id: entry.id,
            symbol: entry.symbol,
            shares: entry.shares,
            unit_price: entry.unit_price,
            total_value,
            action: entry.action.as_str().to_string(),
            created_at: entry.created_at,
        }
    }
}

/// Receipt returned by the buy/sell endpoints.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TradeExecutionResponse {
    pub transaction: TransactionDto,
    #[schema(value_type = f64)]
    pub new_cash_balance: Decimal,
    pub new_shares_held: i64,
}

impl From<TradeExecution> for TradeExecutionResponse {
    fn from(execution: TradeExecution) -> Self {
        Self {
            transaction: execution.transaction.into(),
            new_cash_balance: execution.new_cash_balance,
            new_shares_held: execution.new_shares_held,
        }
    }
}

/// One portfolio row; pricing fields are null when the quote lookup
/// failed for the symbol.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PositionDto {
    pub symbol: String,
    pub shares: i64,
    pub name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub unit_price: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub market_value: Option<Decimal>,
}

impl From<Position> for PositionDto {
    fn from(p: Position) -> Self {
        let (name, unit_price, market_value) = match p.quote {
            Some(q) => (q.name, Some(q.unit_price), Some(q.market_value)),
            None => (None, None, None),
        };
        Self {
            symbol: p.symbol,
            shares: p.shares,
            name,
            unit_price,
            market_value,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub positions: Vec<PositionDto>,
    #[schema(value_type = f64)]
    pub cash_balance: Decimal,
    /// Sum of the market values of priced positions.
    #[schema(value_type = f64)]
    pub holdings_value: Decimal,
    #[schema(value_type = f64)]
    pub grand_total: Decimal,
    /// Symbols whose quote lookup failed; their value is excluded from
    /// the totals above.
    pub missing_quotes: Vec<String>,
}

impl From<PortfolioSummary> for PortfolioResponse {
    fn from(summary: PortfolioSummary) -> Self {
        Self {
            positions: summary.positions.into_iter().map(PositionDto::from).collect(),
            cash_balance: summary.cash_balance,
            holdings_value: summary.holdings_value,
            grand_total: summary.grand_total,
            missing_quotes: summary.missing_quotes,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    pub status: String,
}
