//! Agent configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The database connection string is
//! optional here; its absence only surfaces when the connection manager
//! first tries to build a pool.

use std::net::SocketAddr;

/// Primary variable holding the PostgreSQL connection string.
pub const DATABASE_URL_VAR: &str = "NEON_DATABASE_URL";

/// Fallback variable consulted when [`DATABASE_URL_VAR`] is unset.
pub const DATABASE_URL_FALLBACK_VAR: &str = "DATABASE_URL";

/// Hard upper bound on physical connections, regardless of configuration.
pub const MAX_POOL_CONNECTIONS: u32 = 10;

/// Top-level agent configuration.
///
/// Loaded once at startup via [`AgentConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8000`).
    pub listen_addr: SocketAddr,

    /// PostgreSQL connection string, if configured.
    pub database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Minimum idle connections in the pool.
    pub database_min_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// Capacity of the snapshot broadcast channel.
    pub event_bus_capacity: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            database_url: None,
            database_max_connections: MAX_POOL_CONNECTIONS,
            database_min_connections: 1,
            database_connect_timeout_secs: 5,
            event_bus_capacity: 1024,
        }
    }
}

impl AgentConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let database_url = non_empty_env(DATABASE_URL_VAR)
            .or_else(|| non_empty_env(DATABASE_URL_FALLBACK_VAR));

        Ok(Self {
            listen_addr,
            database_url,
            database_max_connections: parse_env(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            database_min_connections: parse_env(
                "DATABASE_MIN_CONNECTIONS",
                defaults.database_min_connections,
            ),
            database_connect_timeout_secs: parse_env(
                "DATABASE_CONNECT_TIMEOUT_SECS",
                defaults.database_connect_timeout_secs,
            ),
            event_bus_capacity: parse_env("EVENT_BUS_CAPACITY", defaults.event_bus_capacity),
        })
    }

    /// Returns `(min, max)` pool bounds clamped to `1..=10`, with `min <= max`.
    #[must_use]
    pub fn pool_bounds(&self) -> (u32, u32) {
        let max = self.database_max_connections.clamp(1, MAX_POOL_CONNECTIONS);
        let min = self.database_min_connections.clamp(1, max);
        (min, max)
    }
}

/// Reads an environment variable, treating blank values as unset.
fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
