//! Movie repository: the read-only catalog

use anyhow::Result;
use async_trait::async_trait;
use myflix_shared::{Director, Genre, Movie};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

/// Read operations on the movie catalog
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Movie>>;

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>>;

    /// Genre of any movie whose genre has this name
    async fn find_genre(&self, name: &str) -> Result<Option<Genre>>;

    /// Director of any movie directed by someone with this name
    async fn find_director(&self, name: &str) -> Result<Option<Director>>;
}

/// Movie row; genre and director are JSONB documents
#[derive(Debug, sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    description: String,
    genre: Json<Genre>,
    director: Json<Director>,
    image_path: Option<String>,
    featured: bool,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            description: row.description,
            genre: row.genre.0,
            director: row.director.0,
            image_path: row.image_path,
            featured: row.featured,
        }
    }
}

/// PostgreSQL-backed movie repository
#[derive(Clone)]
pub struct PgMovieRepository {
    pool: PgPool,
}

impl PgMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn list(&self) -> Result<Vec<Movie>> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, description, genre, director, image_path, featured
            FROM movies
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, description, genre, director, image_path, featured
            FROM movies
            WHERE title = $1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Movie::from))
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>> {
        let genre = sqlx::query_scalar::<_, Json<Genre>>(
            r#"
            SELECT genre FROM movies
            WHERE genre->>'Name' = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(genre.map(|g| g.0))
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>> {
        let director = sqlx::query_scalar::<_, Json<Director>>(
            r#"
            SELECT director FROM movies
            WHERE director->>'Name' = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(director.map(|d| d.0))
    }
}
