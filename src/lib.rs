//! txcache - Transaction-scoped write buffering over shared key/value caches.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Session / execution layer                   │
//! │        (external: decides get/put/commit/rollback)          │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │              TransactionalCacheManager (txn/)               │
//! │     registry: CacheId → TransactionalCache (lazy, 1:1)      │
//! │  ┌────────────────────┐ ┌────────────────────┐              │
//! │  │ TransactionalCache │ │ TransactionalCache │   ...        │
//! │  │ pending │ missed   │ │ pending │ missed   │              │
//! │  └─────────┬──────────┘ └─────────┬──────────┘              │
//! └────────────┼──────────────────────┼─────────────────────────┘
//!              ↓                      ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │           BackingCache implementations (external)           │
//! │        plain map │ LRU │ blocking-lock │ serializing        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes issued through a buffer stay buffered until `commit`; `rollback`
//! discards them. Misses are tracked so commit can negative-cache them and
//! rollback can release any per-key lock a blocking backing cache took.
//! There is no cross-cache atomicity: commit fan-out is best effort per
//! cache.
//!
//! # Modules
//! - [`common`] - Shared primitives (CacheId, CacheKey, Error)
//! - [`cache`] - The BackingCache capability contract and CacheEntry
//! - [`txn`] - Transactional buffer, manager, and statistics
//!
//! # Quick Start
//! ```ignore
//! use txcache::{CacheEntry, SharedCache, TransactionalCacheManager};
//!
//! let cache: SharedCache<String, String> = make_backing_cache();
//! let mut manager = TransactionalCacheManager::new();
//!
//! // A miss is remembered; the write stays buffered.
//! assert!(manager.get(&cache, &"k1".to_string())?.is_none());
//! manager.put(&cache, "k1".to_string(), CacheEntry::Value("v1".to_string()));
//!
//! // Only now does the backing cache change.
//! manager.commit_all()?;
//! ```

// Core modules
pub mod cache;
pub mod common;
pub mod txn;

// Re-export commonly used items at crate root for convenience
pub use common::{CacheId, CacheKey, Error, Result};

pub use cache::{BackingCache, CacheEntry, SharedCache};
pub use txn::{StatsSnapshot, TransactionalCache, TransactionalCacheManager, TxCacheStats};
