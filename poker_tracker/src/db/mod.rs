//! Database module providing PostgreSQL connection pooling and the repository seam.
//!
//! The pool is opened once at startup, shared by handle, and closed explicitly
//! on shutdown. Tournament storage goes through [`TournamentRepository`].

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub mod config;
pub mod memory;
pub mod repository;

pub use config::DatabaseConfig;
pub use memory::InMemoryTournamentRepository;
pub use repository::{PgTournamentRepository, TournamentRepository};

/// Underlying storage error, re-exported so dependents need not depend on sqlx
pub use sqlx::Error as StorageError;

/// Schema for the `tournaments` table
pub const SCHEMA_SQL: &str = include_str!("../../../migrations/0001_create_tournaments.sql");

/// Owner of the PostgreSQL pool.
///
/// Opened once at startup from a [`DatabaseConfig`] and closed with
/// [`Database::close`] after the server stops accepting requests.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open the pool and establish `min_connections` connections.
    ///
    /// ```no_run
    /// use poker_tracker::db::{Database, DatabaseConfig};
    ///
    /// # async fn example() -> Result<(), sqlx::Error> {
    /// let db = Database::new(&DatabaseConfig::from_env()).await?;
    /// db.ensure_schema().await?;
    /// db.close().await;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial statement through the pool
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the `tournaments` table if it does not exist.
    ///
    /// This is a convenience for tests and fresh installs, not a migration
    /// runner: it only ever applies the single schema file.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Wait for checked-out connections to return, then close them all
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_declares_every_column() {
        for column in ["id", "name", "type", "buy_in", "prize", "itm", "site", "date"] {
            assert!(
                SCHEMA_SQL.contains(&format!("\n    {column} ")),
                "schema is missing column {column}"
            );
        }
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn test_database_connection() {
        let config = DatabaseConfig {
            max_connections: 2,
            ..DatabaseConfig::from_env()
        };

        let db = Database::new(&config)
            .await
            .expect("Failed to connect to database");
        db.health_check().await.expect("Health check failed");
        db.close().await;
    }
}
