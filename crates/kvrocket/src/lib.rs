//! Paginated typed access to partition/range keyed stores.
//!
//! [`KeyValueAccessLayer`] implements the `Repository<T>` contract from
//! `kvrocket_core` over any `KeyValueStore`. Backends are feature-gated:
//! `inmemory` (default) and `dynamodb`.

pub mod access;
pub mod config;
pub mod metrics;
pub mod storage;

pub use access::KeyValueAccessLayer;
pub use config::Config;
pub use metrics::{MeteredRepository, TracingMetrics};
