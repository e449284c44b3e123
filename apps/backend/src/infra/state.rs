use std::sync::Arc;

use crate::config::db::{DbTarget, PoolSettings};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::{AppState, InstanceInfo};
use crate::zone::ZoneResolver;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_target: Option<DbTarget>,
    zone: Option<Arc<ZoneResolver>>,
    instance: Option<InstanceInfo>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_target: None,
            zone: None,
            instance: None,
        }
    }

    pub fn with_db(mut self, target: DbTarget) -> Self {
        self.db_target = Some(target);
        self
    }

    pub fn with_zone(mut self, zone: Arc<ZoneResolver>) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn with_instance(mut self, instance: InstanceInfo) -> Self {
        self.instance = Some(instance);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let zone = self
            .zone
            .unwrap_or_else(|| Arc::new(ZoneResolver::fixed(None)));
        let instance = self
            .instance
            .unwrap_or_else(|| InstanceInfo::detect(None));

        if let Some(target) = self.db_target {
            // single entrypoint: connect + ensure schema
            let conn = bootstrap_db(&target, &PoolSettings::default()).await?;
            Ok(AppState::new(conn, zone, instance))
        } else {
            Ok(AppState::new_without_db(zone, instance))
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
