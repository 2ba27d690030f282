//! Movie catalog routes
//!
//! All routes require a bearer token.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::MovieService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use myflix_shared::{Director, Genre, Movie};

/// Create movie routes
pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies))
        .route("/:title", get(get_movie))
        .route("/genre/:genre_name", get(get_genre))
        .route("/directors/:director_name", get(get_director))
}

/// GET /movies
async fn list_movies(State(state): State<AppState>, _auth: AuthUser) -> ApiResult<Json<Vec<Movie>>> {
    let movies = MovieService::list(state.movies()).await?;
    Ok(Json(movies))
}

/// GET /movies/:title
async fn get_movie(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(title): Path<String>,
) -> ApiResult<Json<Movie>> {
    let movie = MovieService::by_title(state.movies(), &title).await?;
    Ok(Json(movie))
}

/// GET /movies/genre/:genre_name
async fn get_genre(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(genre_name): Path<String>,
) -> ApiResult<Json<Genre>> {
    let genre = MovieService::genre(state.movies(), &genre_name).await?;
    Ok(Json(genre))
}

/// GET /movies/directors/:director_name
async fn get_director(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(director_name): Path<String>,
) -> ApiResult<Json<Director>> {
    let director = MovieService::director(state.movies(), &director_name).await?;
    Ok(Json(director))
}
