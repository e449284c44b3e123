use std::env;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::AppError;

/// Base pool size.
pub const POOL_BASE_CONNECTIONS: u32 = 5;
/// Connections allowed beyond the base size under load.
pub const POOL_OVERFLOW_CONNECTIONS: u32 = 10;

/// Which database the state should be built against
#[derive(Debug, Clone, PartialEq)]
pub enum DbTarget {
    /// PostgreSQL described by environment configuration
    Postgres(DbConfig),
    /// Private in-memory SQLite database (tests and local runs)
    SqliteMemory,
}

/// PostgreSQL connection parameters
#[derive(Clone, PartialEq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl DbConfig {
    /// Read `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER` and `DB_PASSWORD`.
    ///
    /// `password` takes precedence over `DB_PASSWORD`; startup passes the
    /// value fetched from the secret store here.
    pub fn from_env(password: Option<String>) -> Result<Self, AppError> {
        let host = non_empty_var("DB_HOST")
            .ok_or_else(|| AppError::config("DB_HOST not set"))?;
        let password = password
            .filter(|p| !p.is_empty())
            .or_else(|| non_empty_var("DB_PASSWORD"))
            .ok_or_else(|| AppError::config("DB_PASSWORD not set"))?;

        let port_str = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!("DB_PORT must be a valid port number, got '{port_str}'"))
        })?;

        Ok(Self {
            host,
            port,
            name: non_empty_var("DB_NAME").unwrap_or_else(|| "appdb".to_string()),
            user: non_empty_var("DB_USER").unwrap_or_else(|| "appuser".to_string()),
            password,
        })
    }

    /// Connection URL with credentials percent-encoded.
    pub fn url(&self) -> String {
        let user = utf8_percent_encode(&self.user, NON_ALPHANUMERIC);
        let password = utf8_percent_encode(&self.password, NON_ALPHANUMERIC);
        format!(
            "postgresql://{user}:{password}@{}:{}/{}",
            self.host, self.port, self.name
        )
    }
}

/// Pool sizing shared by every database target
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSettings {
    pub pool_min: u32,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
    /// Ping each connection before handing it to a request
    pub test_before_acquire: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            pool_min: POOL_BASE_CONNECTIONS,
            pool_max: POOL_BASE_CONNECTIONS + POOL_OVERFLOW_CONNECTIONS,
            acquire_timeout_ms: 30_000,
            test_before_acquire: true,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
