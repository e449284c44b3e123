//! Backend test support utilities
//!
//! Shared helpers for the item-service test binaries: logging initialization,
//! problem-details assertions and unique test identifiers.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
