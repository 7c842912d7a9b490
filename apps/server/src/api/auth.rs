use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use crate::auth::CurrentUser;
use crate::error::{ApiResult, ErrorBody};
use crate::main_lib::AppState;
use crate::models::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, SessionResponse, UserProfile,
};

/// Register a new user and log them straight in.
#[utoipa::path(post, path = "/api/v1/auth/register", tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, body = SessionResponse),
        (status = 400, body = ErrorBody),
        (status = 409, body = ErrorBody),
    ))]
pub(crate) async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let user = state.user_service.register(body.into()).await?;
    let token = state.auth.issue_token(&user.id)?;
    let session = SessionResponse::new(token, state.auth.token_ttl_secs(), user.into());
    Ok((StatusCode::CREATED, Json(session)))
}

/// Authenticate with username and password.
#[utoipa::path(post, path = "/api/v1/auth/login", tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, body = SessionResponse),
        (status = 401, body = ErrorBody),
    ))]
pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let user = state.user_service.authenticate(body.into()).await?;
    let token = state.auth.issue_token(&user.id)?;
    let session = SessionResponse::new(token, state.auth.token_ttl_secs(), user.into());
    Ok(Json(session))
}

/// Change the current user's password.
#[utoipa::path(post, path = "/api/v1/auth/password", tag = "auth",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody),
    ))]
pub(crate) async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .change_password(&current.user_id, body.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The authenticated user's profile.
#[utoipa::path(get, path = "/api/v1/me", tag = "auth",
    responses(
        (status = 200, body = UserProfile),
        (status = 401, body = ErrorBody),
    ))]
pub(crate) async fn me(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<UserProfile>> {
    let user = state.user_service.get_user(&current.user_id)?;
    Ok(Json(user.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/password", post(change_password))
        .route("/me", get(me))
}
