//! Transactional Cache - the per-cache write buffer.
//!
//! The [`TransactionalCache`] provides:
//! - Write buffering: puts stay local until commit
//! - Miss tracking: keys that missed get negative-cached at commit
//! - Deferred clearing: a clear is applied at commit, and hides stale
//!   backing-cache state until then
//! - Failure-tolerant rollback

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::warn;

use crate::cache::{CacheEntry, SharedCache};
use crate::common::{CacheId, Result};
use crate::txn::{StatsSnapshot, TxCacheStats};

/// A session-scoped write buffer in front of one shared backing cache.
///
/// All entries a session wants cached are held here until the session ends.
/// They are sent to the backing cache when [`commit`](Self::commit) is
/// called, or discarded when the session is rolled back. Reads go straight
/// through to the backing cache, but every miss is remembered: at commit
/// each unanswered miss is negative-cached, and at rollback each miss is
/// removed from the backing cache, so a blocking backing cache that locked
/// the key on the miss always gets its lock released.
///
/// # Architecture
/// ```text
/// ┌────────────────────────────────────────────────────┐
/// │                TransactionalCache                  │
/// │  ┌────────────────┐  ┌─────────────┐  ┌─────────┐  │
/// │  │ pending_writes │  │ missed_keys │  │clear_on_│  │
/// │  │ K → CacheEntry │  │   Set<K>    │  │ commit  │  │
/// │  └────────────────┘  └─────────────┘  └─────────┘  │
/// │            │ commit / rollback │                   │
/// │            ▼                   ▼                   │
/// │  ┌──────────────────────────────────────────────┐  │
/// │  │      delegate: SharedCache (shared, &self)   │  │
/// │  └──────────────────────────────────────────────┘  │
/// └────────────────────────────────────────────────────┘
/// ```
///
/// # Ownership
/// The buffer has exactly one logical owner (the session); every operation
/// takes `&mut self` and the layer holds no locks. The delegate is a shared
/// handle: other sessions may wrap the same backing cache in their own
/// buffers, and those buffers share nothing with this one.
///
/// # Lifecycle
/// One buffer serves many transactions back to back: commit and rollback
/// both leave it empty and ready for the next cycle.
pub struct TransactionalCache<K, V> {
    /// The shared backing cache all buffered mutation is deferred against.
    delegate: SharedCache<K, V>,

    /// When set, the delegate is cleared at commit, and reads return
    /// nothing for the rest of the transaction.
    clear_on_commit: bool,

    /// Entries to send to the delegate at commit. Last write per key wins.
    pending_writes: HashMap<K, CacheEntry<V>>,

    /// Keys the delegate had no entry for during this transaction.
    missed_keys: HashSet<K>,

    /// Performance statistics.
    stats: TxCacheStats,
}

impl<K: Eq + Hash + Clone, V: Clone> TransactionalCache<K, V> {
    /// Create a buffer wrapping the given backing cache.
    pub fn new(delegate: SharedCache<K, V>) -> Self {
        Self {
            delegate,
            clear_on_commit: false,
            pending_writes: HashMap::new(),
            missed_keys: HashSet::new(),
            stats: TxCacheStats::new(),
        }
    }

    // ========================================================================
    // Public API: Transactional reads and writes
    // ========================================================================

    /// Look up a key in the backing cache.
    ///
    /// A miss (`Ok(None)`) is recorded so the key can be negative-cached at
    /// commit or unlocked at rollback. While a clear is pending, every get
    /// returns `Ok(None)`: the backing cache's current contents are doomed
    /// and must not be served.
    ///
    /// Never mutates the backing cache. Buffered pending writes are NOT
    /// visible through get; this layer buffers writes, it is not a
    /// read-your-writes overlay.
    ///
    /// # Errors
    /// Propagates a backing-cache `get` failure (a plain miss is not one).
    pub fn get(&mut self, key: &K) -> Result<Option<CacheEntry<V>>> {
        let entry = self.delegate.get(key)?;

        if entry.is_none() {
            self.missed_keys.insert(key.clone());
            self.stats.misses += 1;
        } else {
            self.stats.hits += 1;
        }

        if self.clear_on_commit {
            return Ok(None);
        }
        Ok(entry)
    }

    /// Buffer an entry for the key, replacing any previously buffered one.
    ///
    /// The backing cache is not touched until [`commit`](Self::commit). The
    /// entry may be [`CacheEntry::Absent`] if the caller already knows the
    /// shadowed source has nothing for this key.
    pub fn put(&mut self, key: K, entry: CacheEntry<V>) {
        self.pending_writes.insert(key, entry);
    }

    /// Deliberate no-op: transactional removal is not supported.
    ///
    /// Buffering a remove and replaying it at commit would let this
    /// transaction delete entries other sessions wrote in the meantime, so
    /// removal is simply not offered here. Callers that need it must go to
    /// the backing cache directly, outside any transaction. Always returns
    /// `None` ("nothing removed"). This is a documented design limitation;
    /// do not "fix" it into a buffered remove.
    pub fn remove(&mut self, _key: &K) -> Option<CacheEntry<V>> {
        None
    }

    /// Request that the backing cache be cleared at commit.
    ///
    /// Discards everything buffered so far (those writes would not survive
    /// the clear anyway); writes buffered after this call are honored at
    /// commit, landing in the freshly cleared cache. Recorded misses are
    /// kept, since their locks still need releasing. Until commit, gets
    /// return nothing (see [`get`](Self::get)).
    pub fn clear(&mut self) {
        self.clear_on_commit = true;
        self.pending_writes.clear();
    }

    // ========================================================================
    // Public API: Transaction boundary
    // ========================================================================

    /// Apply this transaction's buffered state to the backing cache.
    ///
    /// In order:
    /// 1. If a clear is pending, clear the delegate.
    /// 2. Flush every pending write, then negative-cache every missed key
    ///    that was not subsequently written. Pending writes go first so a
    ///    key that was both missed and written keeps its real value. The
    ///    negative puts also release any per-key locks a blocking backing
    ///    cache took on the misses.
    /// 3. Reset, leaving the buffer ready for the next transaction.
    ///
    /// Runs even when nothing was buffered (a no-op flush).
    ///
    /// # Errors
    /// Propagates the first backing-cache `clear`/`put` failure. Entries
    /// already flushed stay flushed; there is no undo.
    pub fn commit(&mut self) -> Result<()> {
        if self.clear_on_commit {
            self.delegate.clear()?;
        }
        self.flush_pending_entries()?;
        self.stats.commits += 1;
        self.reset();
        Ok(())
    }

    /// Discard this transaction's buffered state.
    ///
    /// Pending writes are dropped without ever reaching the backing cache.
    /// Every recorded miss is removed from the backing cache to release any
    /// per-key lock taken on the miss; a `remove` failure is logged as a
    /// warning and counted, never propagated - rollback always completes.
    pub fn rollback(&mut self) {
        self.unlock_missed_entries();
        self.stats.rollbacks += 1;
        self.reset();
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    /// Identity of the wrapped backing cache.
    pub fn id(&self) -> &CacheId {
        self.delegate.id()
    }

    /// Entry count of the wrapped backing cache. Informational only; does
    /// not include pending writes.
    pub fn size(&self) -> usize {
        self.delegate.size()
    }

    /// True if this buffer holds any transactional state.
    pub fn is_dirty(&self) -> bool {
        self.clear_on_commit || !self.pending_writes.is_empty() || !self.missed_keys.is_empty()
    }

    /// Number of writes waiting for commit.
    pub fn pending_write_count(&self) -> usize {
        self.pending_writes.len()
    }

    /// Number of misses recorded this transaction.
    pub fn missed_key_count(&self) -> usize {
        self.missed_keys.len()
    }

    /// Snapshot of this buffer's statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    // ========================================================================
    // Internal: Flush, unlock, reset
    // ========================================================================

    /// Send pending writes, then negative-cache the remaining misses.
    fn flush_pending_entries(&mut self) -> Result<()> {
        for (key, entry) in &self.pending_writes {
            self.delegate.put(key.clone(), entry.clone())?;
            self.stats.writes_flushed += 1;
        }

        // Misses answered by a later put already got their real value above.
        for key in &self.missed_keys {
            if !self.pending_writes.contains_key(key) {
                self.delegate.put(key.clone(), CacheEntry::Absent)?;
                self.stats.negative_writes += 1;
            }
        }

        Ok(())
    }

    /// Release whatever locks the backing cache may hold for recorded
    /// misses. Failures are swallowed: rollback must be total even under
    /// partial backing-cache failure.
    fn unlock_missed_entries(&mut self) {
        for key in &self.missed_keys {
            if let Err(err) = self.delegate.remove(key) {
                warn!(
                    cache = %self.delegate.id(),
                    error = %err,
                    "failed to release missed entry during rollback"
                );
                self.stats.unlock_failures += 1;
            }
        }
    }

    /// Back to a clean slate for the next transaction.
    fn reset(&mut self) {
        self.clear_on_commit = false;
        self.pending_writes.clear();
        self.missed_keys.clear();
    }
}
