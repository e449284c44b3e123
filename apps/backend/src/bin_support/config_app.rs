//! Service configuration loaded from environment variables.
//!
//! Database settings live in `config::db`; everything else the binary needs
//! at startup is collected here once.

use std::env;

use crate::error::AppError;

const DEFAULT_MAX_JSON_PAYLOAD_SIZE: usize = 64 * 1024;

/// Centralized service configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Instance identity (downward API)
    pub pod_name: Option<String>,
    pub node_name: Option<String>,
    /// Operator-provided zone used when the cluster lookup fails
    pub static_zone: Option<String>,

    // Secret store configuration
    pub project_id: Option<String>,
    /// Set when the password is injected directly; skips the secret store
    pub db_password: Option<String>,
    pub db_password_secret_id: String,
    pub db_password_secret_version: String,
    /// Serve from a private in-memory SQLite database instead of PostgreSQL
    pub db_in_memory: bool,

    // HTTP payload limits
    pub max_json_payload_size: usize,
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port_str = var("PORT").unwrap_or_else(|| "8080".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!("PORT must be a valid port number, got '{port_str}'"))
        })?;

        let max_json_payload_size = match var("MAX_JSON_PAYLOAD_SIZE") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(AppError::config(format!(
                        "MAX_JSON_PAYLOAD_SIZE must be a positive byte count, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_MAX_JSON_PAYLOAD_SIZE,
        };

        Ok(Config {
            host,
            port,
            pod_name: var("POD_NAME"),
            node_name: var("NODE_NAME"),
            static_zone: var("ZONE"),
            project_id: var("PROJECT_ID"),
            db_password: var("DB_PASSWORD"),
            db_password_secret_id: var("DB_PASSWORD_SECRET_ID")
                .unwrap_or_else(|| "db-password".to_string()),
            db_password_secret_version: var("DB_PASSWORD_SECRET_VERSION")
                .unwrap_or_else(|| "latest".to_string()),
            db_in_memory: var("DB_IN_MEMORY")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            max_json_payload_size,
        })
    }
}

/// Non-empty environment value
fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
