//! Core types and contracts for kvrocket.
//!
//! Everything here is pure: the attribute model and its typed accessors, the
//! record converter contract, the store and repository contracts, cursors and
//! pages, the error taxonomy and the metrics contract. Concrete stores and the
//! access layer itself live in the `kvrocket` crate.

pub mod attribute;
pub mod converter;
pub mod metrics;
pub mod storage;
