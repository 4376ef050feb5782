//! Transactional cache statistics tracking.

use std::fmt;

/// Statistics tracked by a transactional buffer.
///
/// Plain `u64` counters: a buffer has exactly one logical owner and every
/// operation on it takes `&mut self`, so there is nothing to synchronize
/// (this layer deliberately carries no locks or atomics).
///
/// # Example
/// ```
/// use txcache::TxCacheStats;
///
/// let mut stats = TxCacheStats::new();
/// stats.hits += 1;
/// stats.misses += 1;
/// assert_eq!(stats.snapshot().hit_rate(), 0.5);
/// ```
#[derive(Debug, Default)]
pub struct TxCacheStats {
    /// Lookups answered by the backing cache (including negative hits).
    pub hits: u64,

    /// Lookups the backing cache had no entry for.
    pub misses: u64,

    /// Completed commits.
    pub commits: u64,

    /// Completed rollbacks.
    pub rollbacks: u64,

    /// Pending writes flushed to the backing cache at commit.
    pub writes_flushed: u64,

    /// Negative-cache markers written at commit for unanswered misses.
    pub negative_writes: u64,

    /// Backing-cache `remove` failures swallowed during rollback.
    pub unlock_failures: u64,
}

impl TxCacheStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copyable snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            commits: self.commits,
            rollbacks: self.rollbacks,
            writes_flushed: self.writes_flushed,
            negative_writes: self.negative_writes,
            unlock_failures: self.unlock_failures,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A point-in-time snapshot of transactional cache statistics.
///
/// Snapshots from several buffers can be merged to report on a whole
/// manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub commits: u64,
    pub rollbacks: u64,
    pub writes_flushed: u64,
    pub negative_writes: u64,
    pub unlock_failures: u64,
}

impl StatsSnapshot {
    /// Calculate cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fold another snapshot into this one.
    pub fn merge(&mut self, other: &StatsSnapshot) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.commits += other.commits;
        self.rollbacks += other.rollbacks;
        self.writes_flushed += other.writes_flushed;
        self.negative_writes += other.negative_writes;
        self.unlock_failures += other.unlock_failures;
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TxStats {{ hits: {}, misses: {}, commits: {}, rollbacks: {}, hit_rate: {:.2}% }}",
            self.hits,
            self.misses,
            self.commits,
            self.rollbacks,
            self.hit_rate() * 100.0
        )
    }
}
