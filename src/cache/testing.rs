//! In-memory backing caches used as test doubles by unit tests.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;

use crate::cache::{BackingCache, CacheEntry};
use crate::common::{CacheId, Error, Result};

/// A plain map-backed cache that also records the calls the transactional
/// layer makes against it, so tests can assert on them.
pub(crate) struct MemoryCache<K, V> {
    id: CacheId,
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
    puts: Mutex<Vec<K>>,
    removed: Mutex<Vec<K>>,
    clear_calls: Mutex<usize>,
    fail_puts: bool,
    fail_removes: bool,
}

impl<K: Eq + Hash + Clone, V: Clone> MemoryCache<K, V> {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: CacheId::new(id),
            entries: Mutex::new(HashMap::new()),
            puts: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
            clear_calls: Mutex::new(0),
            fail_puts: false,
            fail_removes: false,
        }
    }

    /// A cache whose `put` always fails, for commit-propagation tests.
    pub(crate) fn failing_puts(id: &str) -> Self {
        Self {
            fail_puts: true,
            ..Self::new(id)
        }
    }

    /// A cache whose `remove` always fails, for exercising the
    /// failure-tolerant rollback path.
    pub(crate) fn failing_removes(id: &str) -> Self {
        Self {
            fail_removes: true,
            ..Self::new(id)
        }
    }

    /// Seed an entry directly, bypassing the transactional layer.
    pub(crate) fn seed(&self, key: K, entry: CacheEntry<V>) {
        self.entries.lock().insert(key, entry);
    }

    /// Peek at the stored entry directly.
    pub(crate) fn stored(&self, key: &K) -> Option<CacheEntry<V>> {
        self.entries.lock().get(key).cloned()
    }

    /// Keys passed to `put`, in call order.
    pub(crate) fn put_keys(&self) -> Vec<K> {
        self.puts.lock().clone()
    }

    /// Keys passed to `remove`, in call order.
    pub(crate) fn removed_keys(&self) -> Vec<K> {
        self.removed.lock().clone()
    }

    /// Number of times `clear` was called.
    pub(crate) fn clear_calls(&self) -> usize {
        *self.clear_calls.lock()
    }
}

impl<K: Eq + Hash + Clone, V: Clone> BackingCache<K, V> for MemoryCache<K, V> {
    fn id(&self) -> &CacheId {
        &self.id
    }

    fn size(&self) -> usize {
        self.entries.lock().len()
    }

    fn get(&self, key: &K) -> Result<Option<CacheEntry<V>>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn put(&self, key: K, entry: CacheEntry<V>) -> Result<()> {
        if self.fail_puts {
            return Err(Error::backend(&self.id, "put", "simulated failure"));
        }
        self.puts.lock().push(key.clone());
        self.entries.lock().insert(key, entry);
        Ok(())
    }

    fn remove(&self, key: &K) -> Result<()> {
        if self.fail_removes {
            return Err(Error::backend(&self.id, "remove", "simulated failure"));
        }
        self.entries.lock().remove(key);
        self.removed.lock().push(key.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.lock().clear();
        *self.clear_calls.lock() += 1;
        Ok(())
    }
}
