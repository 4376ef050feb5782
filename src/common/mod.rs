//! Common types and utilities shared across txcache.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Error types
//! - Identifiers (CacheId)
//! - Composite key building (CacheKey)

pub mod error;
mod cache_id;
mod cache_key;

pub use cache_id::CacheId;
pub use cache_key::CacheKey;
pub use error::{Error, Result};
