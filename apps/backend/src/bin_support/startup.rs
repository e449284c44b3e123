//! Startup steps run sequentially by `main` before the server listens.

use std::sync::Arc;

use tracing::info;

use super::config_app::Config;
use crate::config::db::{DbConfig, DbTarget};
use crate::error::AppError;
use crate::secrets::SecretProvider;
use crate::state::app_state::InstanceInfo;
use crate::zone::{KubeNodeLookup, NodeLookup, ZoneResolver};

/// Database password: `DB_PASSWORD` when set, otherwise the secret store.
pub async fn resolve_db_password(
    cfg: &Config,
    provider: &dyn SecretProvider,
) -> Result<String, AppError> {
    if let Some(password) = &cfg.db_password {
        info!("db_password=source env");
        return Ok(password.clone());
    }

    let password = provider
        .get_secret(
            &cfg.db_password_secret_id,
            cfg.project_id.as_deref(),
            &cfg.db_password_secret_version,
        )
        .await?;

    if password.is_empty() {
        return Err(AppError::config(format!(
            "secret '{}' is empty",
            cfg.db_password_secret_id
        )));
    }

    info!(secret_id = %cfg.db_password_secret_id, "db_password=source secret_manager");
    Ok(password)
}

/// Pick the database target, fetching the password only for PostgreSQL.
pub async fn resolve_db_target(
    cfg: &Config,
    provider: &dyn SecretProvider,
) -> Result<DbTarget, AppError> {
    if cfg.db_in_memory {
        info!("db_target=sqlite_memory");
        return Ok(DbTarget::SqliteMemory);
    }

    let password = resolve_db_password(cfg, provider).await?;
    let db_cfg = DbConfig::from_env(Some(password))?;
    Ok(DbTarget::Postgres(db_cfg))
}

/// Zone resolver backed by the cluster API when a node name is known.
pub fn build_zone_resolver(cfg: &Config) -> ZoneResolver {
    let lookup: Option<Arc<dyn NodeLookup>> = cfg
        .node_name
        .as_ref()
        .map(|_| Arc::new(KubeNodeLookup::new()) as Arc<dyn NodeLookup>);
    ZoneResolver::new(cfg.node_name.clone(), cfg.static_zone.clone(), lookup)
}

pub fn instance_info(cfg: &Config) -> InstanceInfo {
    InstanceInfo::detect(cfg.pod_name.clone())
}
