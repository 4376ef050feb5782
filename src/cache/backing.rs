//! The capability contract required of a backing cache.

use std::sync::Arc;

use crate::cache::CacheEntry;
use crate::common::{CacheId, Result};

/// A shared handle to a backing cache.
///
/// One backing cache instance is shared by however many sessions use it;
/// each session wraps the same handle in its own transactional buffer.
pub type SharedCache<K, V> = Arc<dyn BackingCache<K, V> + Send + Sync>;

/// The capability contract a key/value store must offer to be wrapped by
/// the transactional layer.
///
/// Many strategies can sit behind this trait: a plain map, an LRU-evicting
/// map, a serializing cache, or a blocking cache that takes a per-key lock
/// on a miss and releases it on the next put or remove for that key. This
/// crate implements none of them; it only consumes the contract.
///
/// # Concurrency
/// Methods take `&self` because a backing cache is shared between sessions.
/// Whatever interior mutability or locking that requires is the
/// implementation's own concern; the transactional layer adds no locking of
/// its own and may block inside any of these calls if the implementation
/// blocks (e.g. a blocking cache waiting on another session's in-flight
/// miss).
pub trait BackingCache<K, V> {
    /// Stable identity of this cache.
    ///
    /// The manager keys its buffer registry by this id, so it must never
    /// change for the cache's lifetime.
    fn id(&self) -> &CacheId;

    /// Number of entries currently stored. Informational only.
    fn size(&self) -> usize;

    /// Look up a key.
    ///
    /// Returns `Ok(None)` for a key that is not present; a plain miss must
    /// never be reported as an error. `Ok(Some(CacheEntry::Absent))` is a
    /// hit on a negative entry, not a miss.
    fn get(&self, key: &K) -> Result<Option<CacheEntry<V>>>;

    /// Store an entry, replacing any previous entry for the key.
    ///
    /// Must not fail under normal operation. The entry may be
    /// [`CacheEntry::Absent`]: the transactional layer writes that marker at
    /// commit time for keys that missed (which also releases any per-key
    /// lock a blocking implementation took on the miss).
    fn put(&self, key: K, entry: CacheEntry<V>) -> Result<()>;

    /// Drop the entry for a key, releasing any per-key lock held for it.
    ///
    /// May fail; the one caller inside this crate (the rollback path)
    /// tolerates failure.
    fn remove(&self, key: &K) -> Result<()>;

    /// Drop all entries.
    fn clear(&self) -> Result<()>;
}
