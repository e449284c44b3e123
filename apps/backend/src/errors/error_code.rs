//! Error codes for the item-service API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the item-service API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Item creation payload without an `id`
    MissingItemId,
    /// General validation error
    ValidationError,
    /// General bad request error (malformed body)
    BadRequest,
    /// Request body exceeds the configured limit
    PayloadTooLarge,

    // Resource Not Found
    /// Item not found
    ItemNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Item id already exists
    ItemExists,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable or not initialized
    DbUnavailable,
    /// Database timeout
    DbTimeout,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Secret store or cluster API failure
    ProviderError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingItemId => "MISSING_ITEM_ID",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",

            Self::ItemNotFound => "ITEM_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::ItemExists => "ITEM_EXISTS",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::ProviderError => "PROVIDER_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
