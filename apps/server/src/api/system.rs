use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use paperfolio_storage_sqlite::get_connection;

use crate::main_lib::AppState;
use crate::models::{HealthResponse, ReadyResponse};

/// Liveness probe.
#[utoipa::path(get, path = "/api/v1/healthz", tag = "system",
    responses((status = 200, body = HealthResponse)))]
pub(crate) async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness probe: checks that a pooled database connection can be
/// checked out.
#[utoipa::path(get, path = "/api/v1/readyz", tag = "system",
    responses(
        (status = 200, body = ReadyResponse),
        (status = 503, body = ReadyResponse),
    ))]
pub(crate) async fn readyz(State(state): State<Arc<AppState>>) -> Response {
    match get_connection(&state.pool) {
        Ok(_) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ok".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    status: "unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
