//! Transaction-scoped buffering.
//!
//! The transactional layer defers all mutation of shared backing caches
//! until an explicit commit, and discards it on rollback.
//!
//! # Components
//! - [`TransactionalCache`] - per-cache write buffer and miss tracker
//! - [`TransactionalCacheManager`] - lazy registry of buffers + fan-out
//! - [`TxCacheStats`] / [`StatsSnapshot`] - performance statistics

mod manager;
mod stats;
mod transactional_cache;

pub use manager::TransactionalCacheManager;
pub use stats::{StatsSnapshot, TxCacheStats};
pub use transactional_cache::TransactionalCache;
