//! Cache identifier type.

use std::fmt;

/// Identifies a backing cache.
///
/// Using an owned `String` because:
/// 1. Cache ids come from configuration (namespace names, table names)
/// 2. The manager's registry is keyed by id, so it needs `Eq + Hash`
/// 3. Ids outlive any single transaction
///
/// A cache's id must be stable for its entire lifetime; the manager relies
/// on it to route every call for that cache to the same buffer.
///
/// # Example
/// ```
/// use txcache::CacheId;
///
/// let id = CacheId::new("com.example.OrderMapper");
/// assert_eq!(id.as_str(), "com.example.OrderMapper");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheId(pub String);

impl CacheId {
    /// Create a new CacheId.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        CacheId(id.into())
    }

    /// The id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cache({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_id_new() {
        let id = CacheId::new("users");
        assert_eq!(id.0, "users");
    }

    #[test]
    fn test_cache_id_equality() {
        assert_eq!(CacheId::new("a"), CacheId::new("a"));
        assert_ne!(CacheId::new("a"), CacheId::new("b"));
    }

    #[test]
    fn test_cache_id_display() {
        assert_eq!(format!("{}", CacheId::new("users")), "Cache(users)");
    }
}
