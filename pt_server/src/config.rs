//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use poker_tracker::db::DatabaseConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port used when neither `--port`, `PORT` nor a bind address is given
pub const DEFAULT_PORT: u16 = 5000;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Prometheus scrape listener, disabled when `None`
    pub metrics_bind: Option<SocketAddr>,
}

/// Values given on the command line, which take priority over the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<SocketAddr>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub metrics_bind: Option<SocketAddr>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is present but unusable
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// Resolution order for the bind address: `--bind`, `SERVER_BIND`, then
    /// `0.0.0.0` with the port from `--port`, `PORT` or [`DEFAULT_PORT`].
    pub fn from_lookup<F>(overrides: ConfigOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match overrides.bind {
            Some(bind) => bind,
            None => match lookup("SERVER_BIND") {
                Some(raw) => parse_var("SERVER_BIND", &raw)?,
                None => {
                    let port = match overrides.port {
                        Some(port) => port,
                        None => match lookup("PORT") {
                            Some(raw) => parse_var("PORT", &raw)?,
                            None => DEFAULT_PORT,
                        },
                    };
                    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)
                }
            },
        };

        if overrides.database_url.is_none()
            && lookup("DATABASE_URL").is_some_and(|url| url.trim().is_empty())
        {
            return Err(ConfigError::MissingRequired {
                var: "DATABASE_URL".to_string(),
                hint: "Unset it to use the default, or set postgres://user@host/db".to_string(),
            });
        }

        let mut database = DatabaseConfig::from_lookup(&lookup);
        if let Some(url) = overrides.database_url {
            database.database_url = url;
        }

        let metrics_bind = match overrides.metrics_bind {
            Some(addr) => Some(addr),
            None => lookup("METRICS_BIND")
                .map(|raw| parse_var("METRICS_BIND", &raw))
                .transpose()?,
        };

        Ok(ServerConfig {
            bind,
            database,
            metrics_bind,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.database.database_url;
        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            return Err(ConfigError::Invalid {
                var: "DATABASE_URL".to_string(),
                reason: "Must be a postgres:// or postgresql:// URL".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS".to_string(),
                reason: format!(
                    "Cannot exceed max connections ({})",
                    self.database.max_connections
                ),
            });
        }

        if self.bind.port() == 0 {
            return Err(ConfigError::Invalid {
                var: "PORT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Must differ from the server bind address ({})", self.bind),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var: var.to_string(),
        reason: format!("{raw:?}: {e}"),
    })
}
