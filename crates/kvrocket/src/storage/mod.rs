//! Store backend implementations.
//!
//! This module provides concrete implementations of the `KeyValueStore` trait
//! defined in `kvrocket_core::storage`. The implementations are selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): in-memory backend, used by tests and local runs
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! # Examples
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p kvrocket --features dynamodb
//! ```

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryStore;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;
