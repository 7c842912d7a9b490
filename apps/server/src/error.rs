//! API error type and its mapping onto HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use paperfolio_core::errors::{
    CredentialError, DatabaseError, Error as CoreError, QuoteError, TradeError,
};
use paperfolio_market_data::MarketDataError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error envelope returned on every non-2xx API response. Codes are
/// stable strings clients can branch on; messages are human-readable.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Domain(err) => domain_status(err),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

fn domain_status(err: &CoreError) -> (StatusCode, &'static str) {
    match err {
        CoreError::Credential(CredentialError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        }
        CoreError::Credential(CredentialError::DuplicateUsername(_)) => {
            (StatusCode::CONFLICT, "USERNAME_TAKEN")
        }
        CoreError::Credential(CredentialError::PasswordMismatch) => {
            (StatusCode::BAD_REQUEST, "PASSWORD_MISMATCH")
        }
        CoreError::Credential(CredentialError::NoOpChange) => {
            (StatusCode::BAD_REQUEST, "PASSWORD_UNCHANGED")
        }
        CoreError::Credential(CredentialError::WeakInput(_)) | CoreError::Validation(_) => {
            (StatusCode::BAD_REQUEST, "INVALID_INPUT")
        }
        CoreError::Trade(TradeError::InvalidShareCount(_)) => {
            (StatusCode::BAD_REQUEST, "INVALID_SHARE_COUNT")
        }
        CoreError::Trade(TradeError::InsufficientFunds { .. }) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_FUNDS")
        }
        CoreError::Trade(TradeError::InsufficientShares { .. }) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_SHARES")
        }
        CoreError::Quote(QuoteError::SymbolNotFound(_)) => {
            (StatusCode::NOT_FOUND, "SYMBOL_NOT_FOUND")
        }
        CoreError::Quote(QuoteError::Unavailable(_)) => {
            (StatusCode::BAD_GATEWAY, "QUOTE_UNAVAILABLE")
        }
        CoreError::Database(DatabaseError::NotFound(_)) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        CoreError::Database(_) | CoreError::LedgerDrift(_) | CoreError::Unexpected(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL")
        }
    }
}

impl From<MarketDataError> for ApiError {
    fn from(err: MarketDataError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!("{} {}: {}", status, code, message);
        } else {
            tracing::debug!("{} {}: {}", status, code, message);
        }
        (status, Json(ErrorBody { code, message })).into_response()
    }
}
