use thiserror::Error;

use crate::converter::ConversionError;

/// Errors reported by a store backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
    #[error("Throttled: {0}")]
    Throttled(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Unsupported attribute: {0}")]
    UnsupportedAttribute(String),
    #[error("Store internal error: {0}")]
    Internal(String),
}

/// Errors that can occur during access layer operations.
///
/// Absence of an item is not an error: point lookups return `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Invalid page size: limit must be at least 1")]
    InvalidLimit,
    #[error("Cursor was issued for partition {found}, not {expected}")]
    CursorMismatch { expected: String, found: String },
}

/// Result type for access layer operations.
pub type Result<T> = std::result::Result<T, AccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_collection_not_found_display() {
        let error = StoreError::CollectionNotFound("readings".to_string());
        assert_eq!(error.to_string(), "Collection not found: readings");
    }

    #[test]
    fn test_store_error_throttled_display() {
        let error = StoreError::Throttled("Throughput exceeded, please retry".to_string());
        assert_eq!(error.to_string(), "Throttled: Throughput exceeded, please retry");
    }

    #[test]
    fn test_store_error_connection_failed_display() {
        let error = StoreError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_access_error_is_transparent_over_store_error() {
        let error = AccessError::from(StoreError::Internal("boom".to_string()));
        assert_eq!(error.to_string(), "Store internal error: boom");
    }

    #[test]
    fn test_access_error_is_transparent_over_conversion_error() {
        let error = AccessError::from(ConversionError::MissingField("title".to_string()));
        assert_eq!(error.to_string(), "Missing field: title");
    }

    #[test]
    fn test_cursor_mismatch_display() {
        let error = AccessError::CursorMismatch {
            expected: "user#1".to_string(),
            found: "user#2".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cursor was issued for partition user#2, not user#1"
        );
    }

    #[test]
    fn test_invalid_limit_display() {
        assert_eq!(
            AccessError::InvalidLimit.to_string(),
            "Invalid page size: limit must be at least 1"
        );
    }
}
