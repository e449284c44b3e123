use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::zone::ZoneResolver;

/// Identity of this process instance, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceInfo {
    pub hostname: String,
    pub pod_name: Option<String>,
}

impl InstanceInfo {
    pub fn new(hostname: impl Into<String>, pod_name: Option<String>) -> Self {
        Self {
            hostname: hostname.into(),
            pod_name,
        }
    }

    /// Read the machine hostname; falls back to "unknown".
    pub fn detect(pod_name: Option<String>) -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| "unknown".to_string());
        Self::new(hostname, pod_name)
    }

    pub fn pod(&self) -> &str {
        self.pod_name.as_deref().unwrap_or("unknown")
    }
}

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    pub zone: Arc<ZoneResolver>,
    pub instance: InstanceInfo,
}

impl AppState {
    pub fn new(db: DatabaseConnection, zone: Arc<ZoneResolver>, instance: InstanceInfo) -> Self {
        Self {
            db: Some(db),
            zone,
            instance,
        }
    }

    /// State without a database; data routes answer `DB_UNAVAILABLE`.
    pub fn new_without_db(zone: Arc<ZoneResolver>, instance: InstanceInfo) -> Self {
        Self {
            db: None,
            zone,
            instance,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
