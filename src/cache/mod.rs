//! The backing-cache capability contract.
//!
//! A backing cache is the actual key/value store shadowed by the
//! transactional layer. This crate never implements one; it defines the
//! contract ([`BackingCache`]) plus the stored-value type ([`CacheEntry`])
//! that lets a cache distinguish "explicitly cached as absent" from "not
//! present at all".
//!
//! # Components
//! - [`BackingCache`] - the six-operation capability contract
//! - [`SharedCache`] - a shared handle to a backing cache
//! - [`CacheEntry`] - stored value or negative-cache marker

mod backing;
mod entry;

#[cfg(test)]
pub(crate) mod testing;

pub use backing::{BackingCache, SharedCache};
pub use entry::CacheEntry;
