//! Movie catalog lookups
//!
//! A lookup that matches nothing is a not-found error, never an empty
//! payload.

use crate::error::ApiError;
use crate::repositories::MovieRepository;
use myflix_shared::{Director, Genre, Movie};

pub struct MovieService;

impl MovieService {
    pub async fn list(movies: &dyn MovieRepository) -> Result<Vec<Movie>, ApiError> {
        Ok(movies.list().await?)
    }

    pub async fn by_title(movies: &dyn MovieRepository, title: &str) -> Result<Movie, ApiError> {
        movies
            .find_by_title(title)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Movie '{}' was not found", title)))
    }

    pub async fn genre(movies: &dyn MovieRepository, name: &str) -> Result<Genre, ApiError> {
        movies
            .find_genre(name)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Genre '{}' was not found", name)))
    }

    pub async fn director(movies: &dyn MovieRepository, name: &str) -> Result<Director, ApiError> {
        movies
            .find_director(name)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Director '{}' was not found", name)))
    }
}
