//! Secret store access.
//!
//! Startup depends on the [`SecretProvider`] trait; [`GcpSecretManager`]
//! talks to Google Secret Manager and [`InMemorySecretProvider`] serves
//! fixed values for tests and local runs.

use async_trait::async_trait;
use thiserror::Error;

mod gcp;
mod memory;

pub use gcp::GcpSecretManager;
pub use memory::InMemorySecretProvider;

/// Errors returned by secret providers.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The request could not be formed (no project id, empty secret id or version).
    #[error("secret configuration error: {0}")]
    Config(String),
    /// The secret store rejected or failed the request.
    #[error("failed to fetch secret '{secret_id}': {detail}")]
    Provider { secret_id: String, detail: String },
}

#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Fetch `version` of `secret_id` as text.
    ///
    /// An absent or empty `project_id` falls back to the provider's default
    /// project (normally `PROJECT_ID`).
    async fn get_secret(
        &self,
        secret_id: &str,
        project_id: Option<&str>,
        version: &str,
    ) -> Result<String, SecretError>;
}

/// Pick the explicit project id when non-empty, otherwise the default.
pub fn resolve_project(
    explicit: Option<&str>,
    default: Option<&str>,
) -> Result<String, SecretError> {
    explicit
        .filter(|p| !p.is_empty())
        .or(default.filter(|p| !p.is_empty()))
        .map(str::to_string)
        .ok_or_else(|| SecretError::Config("PROJECT_ID not set".to_string()))
}

/// Fully-qualified secret version resource name.
pub fn secret_version_name(
    project_id: &str,
    secret_id: &str,
    version: &str,
) -> Result<String, SecretError> {
    if secret_id.is_empty() {
        return Err(SecretError::Config("secret id must not be empty".to_string()));
    }
    if version.is_empty() {
        return Err(SecretError::Config(format!(
            "version required for secret '{secret_id}'"
        )));
    }
    Ok(format!(
        "projects/{project_id}/secrets/{secret_id}/versions/{version}"
    ))
}
