//! Router assembly and the OpenAPI document.

mod auth;
mod portfolio;
mod quotes;
mod system;
mod trades;

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::{middleware, Json, Router};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::auth::require_jwt;
use crate::config::Config;
use crate::error::ErrorBody;
use crate::main_lib::AppState;
use crate::models::{
    ChangePasswordRequest, HealthResponse, LoginRequest, PortfolioResponse, PositionDto,
    QuoteResponse, ReadyResponse, RegisterRequest, SessionResponse, TradeExecutionResponse,
    TradeRequest, TransactionDto, UserProfile,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Paperfolio API",
        description = "Simulated stock trading with virtual cash"
    ),
    paths(
        auth::register,
        auth::login,
        auth::change_password,
        auth::me,
        quotes::get_quote,
        trades::buy,
        trades::sell,
        portfolio::get_portfolio,
        portfolio::verify_portfolio,
        portfolio::get_history,
        system::healthz,
        system::readyz,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        ChangePasswordRequest,
        SessionResponse,
        UserProfile,
        QuoteResponse,
        TradeRequest,
        TradeExecutionResponse,
        TransactionDto,
        PortfolioResponse,
        PositionDto,
        HealthResponse,
        ReadyResponse,
        ErrorBody,
    )),
    tags(
        (name = "auth", description = "Registration, login, and password management"),
        (name = "quotes", description = "Live quote lookups"),
        (name = "trades", description = "Buy and sell market orders"),
        (name = "portfolio", description = "Portfolio summary and trade history"),
        (name = "system", description = "Liveness and readiness probes"),
    )
)]
struct ApiDoc;

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Builds the full application router. The caller attaches static file
/// serving as the fallback service.
pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let protected = Router::new()
        .merge(auth::protected_router())
        .merge(quotes::router())
        .merge(trades::router())
        .merge(portfolio::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_jwt));

    let api = Router::new()
        .merge(auth::router())
        .merge(system::router())
        .merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(openapi_spec))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs,
                )))
                .layer(CompressionLayer::new())
                .layer(cors_layer(config)),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins: Vec<HeaderValue> = config
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
