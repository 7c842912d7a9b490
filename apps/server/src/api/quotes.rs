use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::{ApiResult, ErrorBody};
use crate::main_lib::AppState;
use crate::models::QuoteResponse;

/// Look up the latest quote for a symbol. The symbol is matched
/// case-insensitively.
#[utoipa::path(get, path = "/api/v1/quotes/{symbol}", tag = "quotes",
    params(("symbol" = String, Path, description = "Stock ticker symbol")),
    responses(
        (status = 200, body = QuoteResponse),
        (status = 404, body = ErrorBody),
        (status = 502, body = ErrorBody),
    ))]
pub(crate) async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<QuoteResponse>> {
    let quote = state.quote_provider.get_latest_quote(&symbol).await?;
    Ok(Json(quote.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quotes/{symbol}", get(get_quote))
}
