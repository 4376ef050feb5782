//! Transactional Cache Manager - one buffer per backing cache.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::cache::{CacheEntry, SharedCache};
use crate::common::{CacheId, Result};
use crate::txn::{StatsSnapshot, TransactionalCache};

/// Multiplexes transactional buffers over many backing caches for one
/// logical transaction.
///
/// A session may touch several backing caches; the manager lazily creates
/// one [`TransactionalCache`] per distinct cache (keyed by [`CacheId`]),
/// routes every get/put/clear to the right buffer, and fans commit/rollback
/// out to all of them at session end.
///
/// # Lifecycle
/// One manager per session. Buffers are created on first use and live until
/// the manager is dropped; the registry never shrinks. Two managers
/// wrapping the same backing cache hold independent buffers that share no
/// state.
///
/// # No cross-cache atomicity
/// `commit_all` is a plain fan-out, not a two-phase commit: if one buffer's
/// commit fails after earlier buffers committed, the earlier commits stand.
/// This is an accepted limitation of the design, not a bug - each backing
/// cache is an independent store and this layer offers no coordinator.
///
/// # Usage
/// ```ignore
/// let mut manager = TransactionalCacheManager::new();
///
/// // Per statement:
/// if manager.get(&orders_cache, &key)?.is_none() {
///     let value = load_from_source(&key)?;
///     manager.put(&orders_cache, key, CacheEntry::Value(value));
/// }
///
/// // At session end, exactly one of:
/// manager.commit_all()?;
/// // manager.rollback_all();
/// ```
pub struct TransactionalCacheManager<K, V> {
    /// One buffer per distinct backing cache, keyed by cache identity.
    registry: HashMap<CacheId, TransactionalCache<K, V>>,
}

impl<K: Eq + Hash + Clone, V: Clone> TransactionalCacheManager<K, V> {
    /// Create a manager with an empty registry.
    pub fn new() -> Self {
        Self {
            registry: HashMap::new(),
        }
    }

    // ========================================================================
    // Public API: Routed operations
    // ========================================================================

    /// Look up a key through the given cache's buffer.
    ///
    /// # Errors
    /// Propagates a backing-cache `get` failure.
    pub fn get(&mut self, cache: &SharedCache<K, V>, key: &K) -> Result<Option<CacheEntry<V>>> {
        self.buffer_for(cache).get(key)
    }

    /// Buffer a write against the given cache.
    pub fn put(&mut self, cache: &SharedCache<K, V>, key: K, entry: CacheEntry<V>) {
        self.buffer_for(cache).put(key, entry);
    }

    /// Request a clear-at-commit of the given cache.
    pub fn clear(&mut self, cache: &SharedCache<K, V>) {
        self.buffer_for(cache).clear();
    }

    // ========================================================================
    // Public API: Transaction boundary
    // ========================================================================

    /// Commit every buffer created through this manager.
    ///
    /// Iteration order is unspecified.
    ///
    /// # Errors
    /// Propagates the first buffer commit failure; fan-out stops there and
    /// buffers committed before the failure stay committed (see the type
    /// docs on atomicity).
    pub fn commit_all(&mut self) -> Result<()> {
        for buffer in self.registry.values_mut() {
            buffer.commit()?;
        }
        Ok(())
    }

    /// Roll back every buffer created through this manager.
    ///
    /// Infallible: each buffer's rollback swallows backing-cache failures.
    pub fn rollback_all(&mut self) {
        for buffer in self.registry.values_mut() {
            buffer.rollback();
        }
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    /// Number of buffers created so far.
    pub fn buffer_count(&self) -> usize {
        self.registry.len()
    }

    /// True if a buffer exists for the given cache identity.
    pub fn has_buffer(&self, id: &CacheId) -> bool {
        self.registry.contains_key(id)
    }

    /// Statistics aggregated over every buffer in the registry.
    pub fn stats(&self) -> StatsSnapshot {
        let mut total = StatsSnapshot::default();
        for buffer in self.registry.values() {
            total.merge(&buffer.stats());
        }
        total
    }

    // ========================================================================
    // Internal: Registry
    // ========================================================================

    /// Get the buffer for a cache, creating it on first use.
    fn buffer_for(&mut self, cache: &SharedCache<K, V>) -> &mut TransactionalCache<K, V> {
        self.registry
            .entry(cache.id().clone())
            .or_insert_with(|| TransactionalCache::new(Arc::clone(cache)))
    }
}

impl<K: Eq + Hash + Clone, V: Clone> Default for TransactionalCacheManager<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::testing::MemoryCache;

    type StrCache = MemoryCache<String, String>;

    fn create_cache(id: &str) -> (Arc<StrCache>, SharedCache<String, String>) {
        let cache = Arc::new(StrCache::new(id));
        let shared: SharedCache<String, String> = cache.clone();
        (cache, shared)
    }

    fn k(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_lazy_buffer_creation() {
        let (_users, users) = create_cache("users");
        let (_orders, orders) = create_cache("orders");
        let mut manager = TransactionalCacheManager::new();

        assert_eq!(manager.buffer_count(), 0);

        manager.put(&users, k("k1"), CacheEntry::Value(k("v1")));
        assert_eq!(manager.buffer_count(), 1);

        // Repeat access reuses the existing buffer.
        manager.get(&users, &k("k1")).unwrap();
        assert_eq!(manager.buffer_count(), 1);

        manager.clear(&orders);
        assert_eq!(manager.buffer_count(), 2);
    }

    #[test]
    fn test_untouched_cache_has_no_buffer() {
        let (_users, users) = create_cache("users");
        let mut manager = TransactionalCacheManager::new();

        manager.put(&users, k("k1"), CacheEntry::Value(k("v1")));

        assert!(manager.has_buffer(&CacheId::new("users")));
        assert!(!manager.has_buffer(&CacheId::new("orders")));
    }

    #[test]
    fn test_commit_all_touches_every_buffer() {
        let (users_cache, users) = create_cache("users");
        let (orders_cache, orders) = create_cache("orders");
        let mut manager = TransactionalCacheManager::new();

        manager.put(&users, k("u1"), CacheEntry::Value(k("alice")));
        manager.put(&orders, k("o1"), CacheEntry::Value(k("book")));

        // Nothing lands before the commit.
        assert_eq!(users_cache.stored(&k("u1")), None);
        assert_eq!(orders_cache.stored(&k("o1")), None);

        manager.commit_all().unwrap();

        assert_eq!(
            users_cache.stored(&k("u1")),
            Some(CacheEntry::Value(k("alice")))
        );
        assert_eq!(
            orders_cache.stored(&k("o1")),
            Some(CacheEntry::Value(k("book")))
        );
    }

    #[test]
    fn test_rollback_all_touches_every_buffer() {
        let (users_cache, users) = create_cache("users");
        let (orders_cache, orders) = create_cache("orders");
        let mut manager = TransactionalCacheManager::new();

        manager.get(&users, &k("u1")).unwrap(); // miss
        manager.put(&orders, k("o1"), CacheEntry::Value(k("book")));

        manager.rollback_all();

        // The miss was unlocked, the write never landed.
        assert_eq!(users_cache.removed_keys(), vec![k("u1")]);
        assert_eq!(orders_cache.stored(&k("o1")), None);
    }

    #[test]
    fn test_routing_by_cache_identity() {
        let (users_cache, users) = create_cache("users");
        let (orders_cache, orders) = create_cache("orders");
        let mut manager = TransactionalCacheManager::new();

        // Same key, different caches: writes must not cross.
        manager.put(&users, k("k"), CacheEntry::Value(k("user-value")));
        manager.put(&orders, k("k"), CacheEntry::Value(k("order-value")));
        manager.commit_all().unwrap();

        assert_eq!(
            users_cache.stored(&k("k")),
            Some(CacheEntry::Value(k("user-value")))
        );
        assert_eq!(
            orders_cache.stored(&k("k")),
            Some(CacheEntry::Value(k("order-value")))
        );
    }

    #[test]
    fn test_commit_all_propagates_buffer_failure() {
        let flaky = Arc::new(StrCache::failing_puts("flaky"));
        let shared_flaky: SharedCache<String, String> = flaky.clone();
        let mut manager = TransactionalCacheManager::new();

        manager.put(&shared_flaky, k("k1"), CacheEntry::Value(k("v1")));

        assert!(manager.commit_all().is_err());
    }

    #[test]
    fn test_manager_reusable_after_transaction() {
        let (users_cache, users) = create_cache("users");
        let mut manager = TransactionalCacheManager::new();

        manager.put(&users, k("a"), CacheEntry::Value(k("1")));
        manager.commit_all().unwrap();

        // Registry is kept; the buffer starts the next cycle clean.
        assert_eq!(manager.buffer_count(), 1);
        manager.put(&users, k("b"), CacheEntry::Value(k("2")));
        manager.rollback_all();

        assert_eq!(users_cache.stored(&k("a")), Some(CacheEntry::Value(k("1"))));
        assert_eq!(users_cache.stored(&k("b")), None);
    }

    #[test]
    fn test_stats_aggregate_across_buffers() {
        let (users_cache, users) = create_cache("users");
        let (_orders_cache, orders) = create_cache("orders");
        let mut manager = TransactionalCacheManager::new();

        users_cache.seed(k("hit"), CacheEntry::Value(k("v")));
        manager.get(&users, &k("hit")).unwrap();
        manager.get(&orders, &k("miss")).unwrap();
        manager.commit_all().unwrap();

        let stats = manager.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.commits, 2);
    }
}
