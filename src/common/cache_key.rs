//! Composite cache key building.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Seed for the rolling hashcode of an empty key.
const SEED_HASHCODE: u64 = 17;

/// Multiplier folded in per part.
const HASH_MULTIPLIER: u64 = 37;

/// A composite key built from an ordered sequence of parts.
///
/// Callers that identify cache entries by several components (statement id,
/// bound parameter values, pagination offsets) fold each component into a
/// `CacheKey` with [`update`](CacheKey::update). Two keys are equal only when
/// they were built from the same number of parts, in the same order, with
/// the same per-part hashes.
///
/// Each part is reduced to its `u64` hash at update time; the key keeps the
/// part hashes (for equality) plus a rolling hashcode, and can produce a
/// CRC32 checksum over the part hashes for diagnostics.
///
/// # Example
/// ```
/// use txcache::CacheKey;
///
/// let mut key = CacheKey::new();
/// key.update(&"selectUserById");
/// key.update(&42_i64);
///
/// let mut same = CacheKey::new();
/// same.update(&"selectUserById");
/// same.update(&42_i64);
///
/// assert_eq!(key, same);
/// assert_eq!(key.part_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CacheKey {
    /// Rolling hashcode: seed folded with each part hash in order.
    hashcode: u64,

    /// Per-part hashes, in update order. Compared for equality.
    parts: Vec<u64>,
}

impl CacheKey {
    /// Create an empty key.
    pub fn new() -> Self {
        Self {
            hashcode: SEED_HASHCODE,
            parts: Vec::new(),
        }
    }

    /// Fold one part into the key.
    pub fn update<T: Hash + ?Sized>(&mut self, part: &T) {
        let mut hasher = DefaultHasher::new();
        part.hash(&mut hasher);
        let part_hash = hasher.finish();

        self.hashcode = self
            .hashcode
            .wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(part_hash);
        self.parts.push(part_hash);
    }

    /// Fold every part of an iterator into the key, in order.
    pub fn update_all<'a, T, I>(&mut self, parts: I)
    where
        T: Hash + 'a + ?Sized,
        I: IntoIterator<Item = &'a T>,
    {
        for part in parts {
            self.update(part);
        }
    }

    /// Number of parts folded in so far.
    #[inline]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// The rolling hashcode over all parts.
    #[inline]
    pub fn hashcode(&self) -> u64 {
        self.hashcode
    }

    /// CRC32 checksum over the part hashes.
    ///
    /// Cheap integrity/diagnostic value; shown by `Display` so two keys can
    /// be told apart in log output without dumping every part.
    pub fn checksum(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for part_hash in &self.parts {
            hasher.update(&part_hash.to_le_bytes());
        }
        hasher.finalize()
    }
}

impl Default for CacheKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        // Hashcode first: cheap reject before comparing part lists.
        self.hashcode == other.hashcode && self.parts == other.parts
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Consistent with Eq: equal keys have equal hashcodes.
        state.write_u64(self.hashcode);
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.hashcode,
            self.checksum(),
            self.part_count()
        )
    }
}
