use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Postgres error code for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Errors from the relational store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(ref db)
                if db.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                let constraint = db.constraint().unwrap_or("unique constraint").to_string();
                DatabaseError::Conflict(constraint)
            }
            other => DatabaseError::Sqlx(other),
        }
    }
}

/// Pool construction, health checks and migrations for the single
/// application database
pub struct DatabaseManager;

impl DatabaseManager {
    /// Build a pool without connecting. The first query opens a connection,
    /// so the server starts even while the database is down.
    pub fn lazy_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(&config.url)
            .map_err(|e| DatabaseError::InvalidConfig(e.to_string()))?;

        info!(max_connections = config.max_connections, "created database pool");
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("database migrations applied");
        Ok(())
    }

    /// Validate a table or column name before it is interpolated into SQL
    pub fn is_valid_identifier(name: &str) -> bool {
        !name.is_empty()
            && name.len() <= 63
            && name.chars().next().is_some_and(|c| c.is_ascii_lowercase() || c == '_')
            && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }
}
