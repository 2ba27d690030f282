//! User account routes
//!
//! Registration is open; everything else requires a bearer token and is
//! limited to the caller's own account.

use super::extract::ApiJson;
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use myflix_shared::{MessageResponse, RegisterRequest, UpdateUserRequest, User};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route(
            "/:username",
            get(get_user).put(update_user).delete(deregister),
        )
        .route(
            "/:username/movies/:movie_id",
            post(add_favorite).delete(remove_favorite),
        )
}

/// POST /users
async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = UserService::register(state.users(), req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/:username
async fn get_user(auth: AuthUser, Path(username): Path<String>) -> ApiResult<Json<User>> {
    Ok(Json(UserService::get(&auth, &username)?))
}

/// PUT /users/:username
///
/// The body is extracted fallibly so another user's account is refused
/// before the body is looked at.
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
    body: Result<ApiJson<UpdateUserRequest>, ApiError>,
) -> ApiResult<Json<User>> {
    auth.ensure_owner(&username)?;
    let ApiJson(req) = body?;

    let user = UserService::update(state.users(), &auth, &username, req).await?;
    Ok(Json(user))
}

/// POST /users/:username/movies/:movie_id
async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((username, movie_id)): Path<(String, String)>,
) -> ApiResult<Json<User>> {
    let user = UserService::add_favorite(state.users(), &auth, &username, &movie_id).await?;
    Ok(Json(user))
}

/// DELETE /users/:username/movies/:movie_id
async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((username, movie_id)): Path<(String, String)>,
) -> ApiResult<Json<User>> {
    let user = UserService::remove_favorite(state.users(), &auth, &username, &movie_id).await?;
    Ok(Json(user))
}

/// DELETE /users/:username
async fn deregister(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let response = UserService::deregister(state.users(), &auth, &username).await?;
    Ok(Json(response))
}
