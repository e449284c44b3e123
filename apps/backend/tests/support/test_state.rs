use std::sync::Arc;

use item_service::config::db::DbTarget;
use item_service::infra::state::build_state;
use item_service::state::app_state::{AppState, InstanceInfo};
use item_service::zone::ZoneResolver;
use item_service::AppError;

pub const TEST_HOSTNAME: &str = "test-host";
pub const TEST_POD: &str = "items-test-pod";

fn test_instance() -> InstanceInfo {
    InstanceInfo::new(TEST_HOSTNAME, Some(TEST_POD.to_string()))
}

/// State backed by a private in-memory SQLite database.
pub async fn build_test_state() -> Result<AppState, AppError> {
    backend_test_support::logging::init();
    build_state()
        .with_db(DbTarget::SqliteMemory)
        .with_zone(Arc::new(ZoneResolver::fixed(None)))
        .with_instance(test_instance())
        .build()
        .await
}

/// State with no database; data routes report `DB_UNAVAILABLE`.
pub async fn build_test_state_without_db() -> Result<AppState, AppError> {
    backend_test_support::logging::init();
    build_state()
        .with_zone(Arc::new(ZoneResolver::fixed(None)))
        .with_instance(test_instance())
        .build()
        .await
}
