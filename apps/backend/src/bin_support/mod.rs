//! Startup support for the `item-service` binary.

pub mod config_app;
pub mod startup;
