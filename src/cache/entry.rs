//! Stored cache values.

/// A value as stored in a backing cache.
///
/// Caches shadowing a slower data source need two kinds of entry:
/// - [`Value`](CacheEntry::Value) - the source produced this value
/// - [`Absent`](CacheEntry::Absent) - the source was consulted and had
///   nothing (negative caching), so a repeat lookup should not hit the
///   source again
///
/// Lookups return `Option<CacheEntry<V>>`, which keeps three states apart:
/// `None` means the key is not in the cache at all (a miss), `Some(Absent)`
/// is a hit on a negative entry, and `Some(Value(v))` is a regular hit.
/// Collapsing the first two into one "null" is a classic source of cache
/// bugs; the two-level shape makes the distinction explicit.
///
/// # Example
/// ```
/// use txcache::CacheEntry;
///
/// let hit = CacheEntry::Value("row");
/// let negative: CacheEntry<&str> = CacheEntry::Absent;
///
/// assert!(hit.is_value());
/// assert!(negative.is_absent());
/// assert_eq!(hit.into_value(), Some("row"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheEntry<V> {
    /// A real cached value.
    Value(V),

    /// Negative-cache marker: the shadowed source had nothing for this key.
    Absent,
}

impl<V> CacheEntry<V> {
    /// True if this is a real value.
    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self, CacheEntry::Value(_))
    }

    /// True if this is the negative-cache marker.
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, CacheEntry::Absent)
    }

    /// Borrow the value, if any.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        match self {
            CacheEntry::Value(v) => Some(v),
            CacheEntry::Absent => None,
        }
    }

    /// Consume the entry, yielding the value if any.
    #[inline]
    pub fn into_value(self) -> Option<V> {
        match self {
            CacheEntry::Value(v) => Some(v),
            CacheEntry::Absent => None,
        }
    }
}
