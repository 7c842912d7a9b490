use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Extension, Json, Router};

use crate::auth::CurrentUser;
use crate::error::{ApiResult, ErrorBody};
use crate::main_lib::AppState;
use crate::models::{TradeExecutionResponse, TradeRequest};

/// Buy shares at the current market price.
#[utoipa::path(post, path = "/api/v1/trades/buy", tag = "trades",
    request_body = TradeRequest,
    responses(
        (status = 200, body = TradeExecutionResponse),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 422, body = ErrorBody),
        (status = 502, body = ErrorBody),
    ))]
pub(crate) async fn buy(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<TradeRequest>,
) -> ApiResult<Json<TradeExecutionResponse>> {
    let execution = state
        .trading_service
        .buy(&current.user_id, &body.symbol, body.shares)
        .await?;
    Ok(Json(execution.into()))
}

/// Sell shares from the current position at the market price.
#[utoipa::path(post, path = "/api/v1/trades/sell", tag = "trades",
    request_body = TradeRequest,
    responses(
        (status = 200, body = TradeExecutionResponse),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 422, body = ErrorBody),
        (status = 502, body = ErrorBody),
    ))]
pub(crate) async fn sell(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<TradeRequest>,
) -> ApiResult<Json<TradeExecutionResponse>> {
    let execution = state
        .trading_service
        .sell(&current.user_id, &body.symbol, body.shares)
        .await?;
    Ok(Json(execution.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trades/buy", post(buy))
        .route("/trades/sell", post(sell))
}
