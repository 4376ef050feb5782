//! Error types for txcache.

use thiserror::Error;

use crate::common::CacheId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in txcache.
///
/// The buffering layer itself never fails: every error originates in a
/// backing cache and is either propagated (get/put/clear paths) or, on the
/// rollback path only, caught and logged as a warning.
#[derive(Debug, Error)]
pub enum Error {
    /// A backing cache failed while servicing an operation.
    ///
    /// `op` names the capability that failed ("get", "put", "remove",
    /// "clear") so callers can tell a failed flush from a failed lookup.
    #[error("backing cache {cache} failed during {op}: {message}")]
    Backend {
        /// Identity of the cache that failed.
        cache: CacheId,
        /// The capability that failed.
        op: &'static str,
        /// Implementation-defined description of the failure.
        message: String,
    },
}

impl Error {
    /// Build a backend failure for the given cache and operation.
    pub fn backend(cache: &CacheId, op: &'static str, message: impl Into<String>) -> Self {
        Error::Backend {
            cache: cache.clone(),
            op,
            message: message.into(),
        }
    }
}
