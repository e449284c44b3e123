#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod bin_support;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod secrets;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;
pub mod zone;

// Re-exports for public API
pub use config::db::{DbConfig, DbTarget, PoolSettings};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{JsonBodyLimit, ValidatedJson};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::{AppState, InstanceInfo};
pub use zone::{ZoneResolution, ZoneResolver};
