//! Test helpers for generating unique test data
//!
//! ULID-suffixed identifiers keep item ids from colliding between tests that
//! share a database.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("item");
/// let id2 = unique_str("item");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("item-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique item id.
pub fn unique_item_id() -> String {
    unique_str("item").to_lowercase()
}
