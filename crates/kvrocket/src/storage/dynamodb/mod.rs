//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of `KeyValueStore`
//! using `aws-sdk-dynamodb`, plus provisioning for the table it expects.

mod conversions;
mod error;
mod store;
mod table;

pub use store::DynamoDbStore;
pub use table::{ensure_table, TableOutcome};
