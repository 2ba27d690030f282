//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! The stores are trait objects so the same router runs over PostgreSQL in
//! production and over the in-memory store in tests. JWT keys are derived
//! once here and shared. Every field is cheap to clone.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::{
    InMemoryStore, MovieRepository, PgMovieRepository, PgUserRepository, UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Credential store
    pub users: Arc<dyn UserRepository>,
    /// Movie catalog
    pub movies: Arc<dyn MovieRepository>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
}

impl AppState {
    /// Create application state over arbitrary stores
    pub fn new(
        users: Arc<dyn UserRepository>,
        movies: Arc<dyn MovieRepository>,
        config: AppConfig,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_expiry_secs);

        Self {
            users,
            movies,
            config: Arc::new(config),
            jwt,
        }
    }

    /// State backed by a PostgreSQL pool
    pub fn postgres(pool: PgPool, config: AppConfig) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgMovieRepository::new(pool)),
            config,
        )
    }

    /// State backed by one in-memory store serving both repositories
    pub fn in_memory(store: InMemoryStore, config: AppConfig) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store, config)
    }

    #[inline]
    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    #[inline]
    pub fn movies(&self) -> &dyn MovieRepository {
        self.movies.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
