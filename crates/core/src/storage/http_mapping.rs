//! Pure functions for mapping access errors to HTTP status codes.
//!
//! Callers that surface access layer failures over HTTP, and the metrics
//! decorator that buckets failures into 4xx/5xx classes, share this mapping.

use super::{AccessError, StoreError};

/// Maps an [`AccessError`] to an HTTP status code.
///
/// - `Conversion` -> 400 (Bad Request)
/// - `InvalidKey`, `InvalidLimit`, `CursorMismatch` -> 400 (Bad Request)
/// - `Store(CollectionNotFound)` -> 404 (Not Found)
/// - `Store(Throttled)` -> 429 (Too Many Requests)
/// - `Store(Rejected)` -> 400 (Bad Request)
/// - `Store(ConnectionFailed)` -> 503 (Service Unavailable)
/// - `Store(UnsupportedAttribute)`, `Store(Internal)` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use kvrocket_core::storage::{access_error_to_status_code, AccessError, StoreError};
///
/// let error = AccessError::Store(StoreError::Throttled("slow down".to_string()));
/// assert_eq!(access_error_to_status_code(&error), 429);
/// ```
pub fn access_error_to_status_code(error: &AccessError) -> u16 {
    match error {
        AccessError::Conversion(_) => 400,
        AccessError::InvalidKey(_) => 400,
        AccessError::InvalidLimit => 400,
        AccessError::CursorMismatch { .. } => 400,
        AccessError::Store(store) => store_error_to_status_code(store),
    }
}

fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::CollectionNotFound(_) => 404,
        StoreError::Throttled(_) => 429,
        StoreError::Rejected(_) => 400,
        StoreError::ConnectionFailed(_) => 503,
        StoreError::UnsupportedAttribute(_) => 500,
        StoreError::Internal(_) => 500,
    }
}
