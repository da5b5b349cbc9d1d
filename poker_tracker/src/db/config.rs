//! Connection pool settings.

use std::env;
use std::str::FromStr;

/// Settings for [`super::Database::new`]. Durations are whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a request waits for a free connection before failing
    pub connection_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Connection string used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/pokertracker";

impl DatabaseConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `DATABASE_URL`: PostgreSQL connection string (default: local `pokertracker` database)
    /// - `DB_MAX_CONNECTIONS`: Maximum pool size (default: 10)
    /// - `DB_MIN_CONNECTIONS`: Minimum pool size (default: 1)
    /// - `DB_CONNECTION_TIMEOUT_SECS`: Acquire timeout in seconds (default: 5)
    /// - `DB_IDLE_TIMEOUT_SECS`: Idle timeout in seconds (default: 300)
    /// - `DB_MAX_LIFETIME_SECS`: Max lifetime in seconds (default: 1800)
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::development();

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_or(lookup("DB_MAX_CONNECTIONS"), defaults.max_connections),
            min_connections: parse_or(lookup("DB_MIN_CONNECTIONS"), defaults.min_connections),
            connection_timeout_secs: parse_or(
                lookup("DB_CONNECTION_TIMEOUT_SECS"),
                defaults.connection_timeout_secs,
            ),
            idle_timeout_secs: parse_or(lookup("DB_IDLE_TIMEOUT_SECS"), defaults.idle_timeout_secs),
            max_lifetime_secs: parse_or(lookup("DB_MAX_LIFETIME_SECS"), defaults.max_lifetime_secs),
        }
    }

    /// Local database at [`DEFAULT_DATABASE_URL`] with the stock pool sizes
    pub fn development() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            min_connections: 1,
            connection_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        }
    }
}

/// Parse an optional raw value, falling back to `default`
fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::development()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_defaults() {
        let config = DatabaseConfig::from_lookup(|_| None);
        assert_eq!(config, DatabaseConfig::development());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "postgresql://tracker@db/tracker"),
            ("DB_MAX_CONNECTIONS", "25"),
            ("DB_MIN_CONNECTIONS", "not-a-number"),
            ("DB_IDLE_TIMEOUT_SECS", "60"),
        ]);
        let config = DatabaseConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.database_url, "postgresql://tracker@db/tracker");
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.idle_timeout_secs, 60);
        assert_eq!(config.max_lifetime_secs, 1800);
    }
}
