use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use crate::auth::CurrentUser;
use crate::error::{ApiResult, ErrorBody};
use crate::main_lib::AppState;
use crate::models::{PortfolioResponse, TransactionDto};

/// Current holdings priced at the latest quotes, plus cash and totals.
/// Positions whose quote lookup fails are listed unpriced rather than
/// failing the whole summary.
#[utoipa::path(get, path = "/api/v1/portfolio", tag = "portfolio",
    responses(
        (status = 200, body = PortfolioResponse),
        (status = 401, body = ErrorBody),
    ))]
pub(crate) async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<PortfolioResponse>> {
    let summary = state.portfolio_service.summary(&current.user_id).await?;
    Ok(Json(summary.into()))
}

/// Audit the stored positions against the fold of the trade ledger.
#[utoipa::path(post, path = "/api/v1/portfolio/verify", tag = "portfolio",
    responses(
        (status = 204),
        (status = 500, body = ErrorBody),
    ))]
pub(crate) async fn verify_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.holdings_service.verify_against_ledger(&current.user_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// The user's full trade history, oldest first.
#[utoipa::path(get, path = "/api/v1/history", tag = "portfolio",
    responses(
        (status = 200, body = Vec<TransactionDto>),
        (status = 401, body = ErrorBody),
    ))]
pub(crate) async fn get_history(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<TransactionDto>>> {
    let entries = state.ledger_service.history(&current.user_id)?;
    Ok(Json(entries.into_iter().map(TransactionDto::from).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio", get(get_portfolio))
        .route("/portfolio/verify", post(verify_portfolio))
        .route("/history", get(get_history))
}
