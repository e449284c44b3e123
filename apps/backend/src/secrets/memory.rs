use std::collections::HashMap;

use async_trait::async_trait;

use super::{resolve_project, secret_version_name, SecretError, SecretProvider};

/// Secret provider backed by a fixed map of resource names to values.
#[derive(Debug, Clone, Default)]
pub struct InMemorySecretProvider {
    default_project: Option<String>,
    secrets: HashMap<String, String>,
}

impl InMemorySecretProvider {
    pub fn new(default_project: Option<String>) -> Self {
        Self {
            default_project,
            secrets: HashMap::new(),
        }
    }

    /// Register a value under `projects/{project}/secrets/{secret_id}/versions/{version}`.
    pub fn with_secret(
        mut self,
        project_id: &str,
        secret_id: &str,
        version: &str,
        value: impl Into<String>,
    ) -> Self {
        let name = format!("projects/{project_id}/secrets/{secret_id}/versions/{version}");
        self.secrets.insert(name, value.into());
        self
    }
}

#[async_trait]
impl SecretProvider for InMemorySecretProvider {
    async fn get_secret(
        &self,
        secret_id: &str,
        project_id: Option<&str>,
        version: &str,
    ) -> Result<String, SecretError> {
        let project = resolve_project(project_id, self.default_project.as_deref())?;
        let name = secret_version_name(&project, secret_id, version)?;
        self.secrets
            .get(&name)
            .cloned()
            .ok_or_else(|| SecretError::Provider {
                secret_id: secret_id.to_string(),
                detail: format!("404 NOT_FOUND: {name} not found"),
            })
    }
}
