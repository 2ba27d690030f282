//! PostgreSQL pool and schema
//!
//! The pool is sized from `[database]` in the app config; the timeouts below
//! are fixed. Migrations are embedded at build time from `backend/migrations`.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Open a pool against `config.url`, tagged `myflix` in `pg_stat_activity`
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.url)
        .context("invalid database URL")?
        .application_name("myflix");

    let pool = pool_options(config.max_connections)
        .connect_with(options)
        .await
        .context("failed to connect to the database")?;

    info!(max_connections = config.max_connections, "Database pool created");
    Ok(pool)
}

fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .min_connections(1)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
}

/// Apply pending migrations, then report the size of the catalog
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("database migration failed")?;

    let movies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
        .fetch_one(pool)
        .await?;
    if movies == 0 {
        warn!("Movie catalog is empty; catalog routes will return no results");
    } else {
        info!(movies, "Schema up to date");
    }
    Ok(())
}

/// Round-trip a trivial query; used by the readiness probe
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
        warn!(error = %e, "Database health check failed");
        e
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let mut config = AppConfig::default().database;
        config.url = "not a url".to_string();

        let err = connect(&config).await.unwrap_err();
        assert!(err.to_string().contains("invalid database URL"));
    }

    #[test]
    fn test_pool_never_sized_zero() {
        assert_eq!(pool_options(0).get_max_connections(), 1);
        assert_eq!(pool_options(8).get_max_connections(), 8);
    }
}
