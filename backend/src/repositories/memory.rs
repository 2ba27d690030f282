//! In-memory store
//!
//! Implements both repositories over process-local vectors. Used by the test
//! suites and by the `memory` store backend for local development. Each
//! operation holds the lock for its whole read-modify-write, so single
//! operations are atomic; sequences of operations are not.

use super::movie::MovieRepository;
use super::user::{NewUser, UserChanges, UserRecord, UserRepository};
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use myflix_shared::{Director, Genre, Movie};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local user and movie store
#[derive(Clone, Default)]
pub struct InMemoryStore {
    users: Arc<RwLock<Vec<UserRecord>>>,
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a catalog
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            users: Arc::default(),
            movies: Arc::new(RwLock::new(movies)),
        }
    }

    /// Store pre-loaded with [`demo_catalog`]
    pub fn with_demo_catalog() -> Self {
        Self::with_movies(demo_catalog())
    }

    /// Apply `f` to the user with this username and return the result
    async fn modify<F>(&self, username: &str, f: F) -> Option<UserRecord>
    where
        F: FnOnce(&mut UserRecord) + Send,
    {
        let mut users = self.users.write().await;
        let user = users.iter_mut().find(|u| u.username == username)?;
        f(user);
        user.updated_at = Utc::now();
        Some(user.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord> {
        let mut users = self.users.write().await;
        // Mirrors the unique index on users.username
        if users.iter().any(|u| u.username == user.username) {
            bail!("duplicate key: username {}", user.username);
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: user.username,
            password_hash: user.password_hash,
            email: user.email,
            birthday: user.birthday,
            favorite_movies: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        users.push(record.clone());
        Ok(record)
    }

    async fn update(&self, username: &str, changes: UserChanges) -> Result<Option<UserRecord>> {
        let mut users = self.users.write().await;
        if let Some(new_name) = &changes.username {
            if new_name != username && users.iter().any(|u| &u.username == new_name) {
                bail!("duplicate key: username {}", new_name);
            }
        }

        let Some(user) = users.iter_mut().find(|u| u.username == username) else {
            return Ok(None);
        };
        if let Some(value) = changes.username {
            user.username = value;
        }
        if let Some(value) = changes.password_hash {
            user.password_hash = value;
        }
        if let Some(value) = changes.email {
            user.email = value;
        }
        if let Some(value) = changes.birthday {
            user.birthday = Some(value);
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn push_favorite(&self, username: &str, movie_id: &str) -> Result<Option<UserRecord>> {
        let movie_id = movie_id.to_string();
        Ok(self
            .modify(username, move |user| user.favorite_movies.push(movie_id))
            .await)
    }

    async fn pull_favorite(&self, username: &str, movie_id: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .modify(username, |user| {
                user.favorite_movies.retain(|id| id != movie_id)
            })
            .await)
    }

    async fn delete(&self, username: &str) -> Result<Option<UserRecord>> {
        let mut users = self.users.write().await;
        let index = users.iter().position(|u| u.username == username);
        Ok(index.map(|i| users.remove(i)))
    }
}

#[async_trait]
impl MovieRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Movie>> {
        let mut movies = self.movies.read().await.clone();
        movies.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(movies)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>> {
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.title == title).cloned())
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>> {
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .find(|m| m.genre.name == name)
            .map(|m| m.genre.clone()))
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>> {
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .find(|m| m.director.name == name)
            .map(|m| m.director.clone()))
    }
}

/// Small catalog used by the `memory` backend and by tests
pub fn demo_catalog() -> Vec<Movie> {
    let thriller = Genre {
        name: "Thriller".to_string(),
        description: "Suspenseful stories built around tension and danger.".to_string(),
    };
    let science_fiction = Genre {
        name: "Science Fiction".to_string(),
        description: "Speculative stories about science and technology.".to_string(),
    };
    let nolan = Director {
        name: "Christopher Nolan".to_string(),
        bio: "British-American filmmaker known for non-linear storytelling.".to_string(),
        birth: Some(1970),
        death: None,
    };
    let hitchcock = Director {
        name: "Alfred Hitchcock".to_string(),
        bio: "English filmmaker, the Master of Suspense.".to_string(),
        birth: Some(1899),
        death: Some(1980),
    };

    vec![
        Movie {
            id: Uuid::from_u128(0x01),
            title: "Inception".to_string(),
            description: "A thief who steals secrets through dream-sharing is given a final job."
                .to_string(),
            genre: science_fiction.clone(),
            director: nolan.clone(),
            image_path: Some("inception.png".to_string()),
            featured: true,
        },
        Movie {
            id: Uuid::from_u128(0x02),
            title: "Interstellar".to_string(),
            description: "Explorers travel through a wormhole in search of a new home for humanity."
                .to_string(),
            genre: science_fiction,
            director: nolan,
            image_path: Some("interstellar.png".to_string()),
            featured: false,
        },
        Movie {
            id: Uuid::from_u128(0x03),
            title: "Psycho".to_string(),
            description: "A secretary on the run checks into a remote motel.".to_string(),
            genre: thriller.clone(),
            director: hitchcock.clone(),
            image_path: Some("psycho.png".to_string()),
            featured: false,
        },
        Movie {
            id: Uuid::from_u128(0x04),
            title: "Vertigo".to_string(),
            description: "A retired detective becomes obsessed with a woman he is hired to follow."
                .to_string(),
            genre: thriller,
            director: hitchcock,
            image_path: None,
            featured: true,
        },
    ]
}
