//! Login route
//!
//! Exchanges a username/password pair for a session token.

use super::extract::ApiJson;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use myflix_shared::{LoginRequest, LoginResponse};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// POST /login
///
/// Password verification runs on the blocking thread pool.
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = UserService::login(state.users(), state.jwt(), req).await?;
    Ok(Json(response))
}
