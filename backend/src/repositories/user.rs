//! User repository: the credential store

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use myflix_shared::User;
use sqlx::PgPool;
use uuid::Uuid;

/// User record as persisted, password hash included
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    pub favorite_movies: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Public view of the record, without the password hash
    pub fn into_public(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            birthday: self.birthday,
            favorite_movies: self.favorite_movies,
        }
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

/// Input for updating a user; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// Persistence operations on user accounts
///
/// Every lookup is by exact username except [`find_by_id`], which resolves
/// token subjects. Mutations return the record as it is after the write, or
/// `None` when no user has the given username.
///
/// [`find_by_id`]: UserRepository::find_by_id
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>>;

    async fn username_exists(&self, username: &str) -> Result<bool> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord>;

    async fn update(&self, username: &str, changes: UserChanges) -> Result<Option<UserRecord>>;

    /// Append a movie id to the favorites list; duplicates are kept
    async fn push_favorite(&self, username: &str, movie_id: &str) -> Result<Option<UserRecord>>;

    /// Remove every occurrence of a movie id from the favorites list
    async fn pull_favorite(&self, username: &str, movie_id: &str) -> Result<Option<UserRecord>>;

    /// Delete the account, returning the removed record
    async fn delete(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Readiness probe for the backing store
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

const USER_COLUMNS: &str =
    "id, username, password_hash, email, birthday, favorite_movies, created_at, updated_at";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (username, password_hash, email, birthday)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(user.birthday)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update(&self, username: &str, changes: UserChanges) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                password_hash = COALESCE($3, password_hash),
                email = COALESCE($4, email),
                birthday = COALESCE($5, birthday),
                updated_at = NOW()
            WHERE username = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(changes.username)
        .bind(changes.password_hash)
        .bind(changes.email)
        .bind(changes.birthday)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn push_favorite(&self, username: &str, movie_id: &str) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            UPDATE users SET
                favorite_movies = array_append(favorite_movies, $2),
                updated_at = NOW()
            WHERE username = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn pull_favorite(&self, username: &str, movie_id: &str) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            UPDATE users SET
                favorite_movies = array_remove(favorite_movies, $2),
                updated_at = NOW()
            WHERE username = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete(&self, username: &str) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "DELETE FROM users WHERE username = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn ping(&self) -> Result<()> {
        crate::db::health_check(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_public_drops_password_hash() {
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: "alice1".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            email: "alice@example.com".to_string(),
            birthday: None,
            favorite_movies: vec!["m1".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let public = record.clone().into_public();
        assert_eq!(public.id, record.id);
        assert_eq!(public.favorite_movies, record.favorite_movies);

        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("argon2"));
    }
}
