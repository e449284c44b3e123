use std::env;
use std::sync::Once;

use async_trait::async_trait;
use google_cloud_auth::credentials::Credentials;
use google_cloud_gax::retry_policy::{Aip194Strict, RetryPolicyExt};
use google_cloud_secretmanager_v1::client::SecretManagerService;
use tracing::{debug, error, warn};

use super::{resolve_project, secret_version_name, SecretError, SecretProvider};

static INIT_CRYPTO: Once = Once::new();

fn install_crypto_provider_once() {
    INIT_CRYPTO.call_once(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed");
        }
    });
}

/// Google Secret Manager client.
///
/// Credentials are Application Default Credentials: a key file named by
/// `GOOGLE_APPLICATION_CREDENTIALS`, gcloud user credentials, or the
/// workload identity of the instance metadata server. Each fetch is a single
/// attempt.
#[derive(Clone)]
pub struct GcpSecretManager {
    client: SecretManagerService,
    default_project: Option<String>,
}

impl std::fmt::Debug for GcpSecretManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcpSecretManager")
            .field("default_project", &self.default_project)
            .finish_non_exhaustive()
    }
}

impl GcpSecretManager {
    /// Client using ambient credentials and, when given, a non-default endpoint.
    pub async fn new(
        default_project: Option<String>,
        endpoint: Option<String>,
    ) -> Result<Self, SecretError> {
        Self::build(default_project, endpoint, None).await
    }

    /// Client with explicit credentials instead of the ambient ones.
    pub async fn with_credentials(
        default_project: Option<String>,
        endpoint: Option<String>,
        credentials: Credentials,
    ) -> Result<Self, SecretError> {
        Self::build(default_project, endpoint, Some(credentials)).await
    }

    /// Build from `PROJECT_ID`, honoring a `SECRET_MANAGER_ENDPOINT` override.
    pub async fn from_env() -> Result<Self, SecretError> {
        let project = env::var("PROJECT_ID").ok().filter(|p| !p.is_empty());
        let endpoint = env::var("SECRET_MANAGER_ENDPOINT").ok();
        Self::new(project, endpoint).await
    }

    async fn build(
        default_project: Option<String>,
        endpoint: Option<String>,
        credentials: Option<Credentials>,
    ) -> Result<Self, SecretError> {
        install_crypto_provider_once();

        let mut builder =
            SecretManagerService::builder().with_retry_policy(Aip194Strict.with_attempt_limit(1));
        if let Some(endpoint) = normalize_endpoint(endpoint) {
            builder = builder.with_endpoint(endpoint);
        }
        if let Some(credentials) = credentials {
            builder = builder.with_credentials(credentials);
        }

        let client = builder.build().await.map_err(|e| {
            warn!(error = %e, "Secret Manager client could not be created");
            SecretError::Config(format!("failed to create Secret Manager client: {e}"))
        })?;

        Ok(Self {
            client,
            default_project,
        })
    }

    async fn access_version(&self, name: &str) -> Result<String, String> {
        let response = self
            .client
            .access_secret_version()
            .set_name(name)
            .send()
            .await
            .map_err(|e| describe(&e))?;

        let payload = response
            .payload
            .ok_or_else(|| "secret version has no payload".to_string())?;
        String::from_utf8(payload.data.to_vec())
            .map_err(|_| "secret payload is not UTF-8".to_string())
    }
}

/// Trailing slashes would produce `//v1/...` request paths.
fn normalize_endpoint(endpoint: Option<String>) -> Option<String> {
    endpoint
        .map(|e| e.trim().trim_end_matches('/').to_string())
        .filter(|e| !e.is_empty())
}

fn describe(err: &google_cloud_gax::error::Error) -> String {
    match (err.http_status_code(), err.status()) {
        (Some(code), Some(status)) => format!("{code}: {}", status.message),
        (None, Some(status)) => status.message.clone(),
        _ => err.to_string(),
    }
}

#[async_trait]
impl SecretProvider for GcpSecretManager {
    async fn get_secret(
        &self,
        secret_id: &str,
        project_id: Option<&str>,
        version: &str,
    ) -> Result<String, SecretError> {
        let project = resolve_project(project_id, self.default_project.as_deref())?;
        let name = secret_version_name(&project, secret_id, version)?;

        debug!(secret_id, project = %project, version, "fetching secret");

        self.access_version(&name).await.map_err(|detail| {
            error!(secret_id, project = %project, version, error = %detail, "Error getting secret");
            SecretError::Provider {
                secret_id: secret_id.to_string(),
                detail,
            }
        })
    }
}
