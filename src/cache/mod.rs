//! Cache layer
//!
//! In-process caching for hot read paths (the news home listing). Entries
//! are JSON-serialized so any serde type can be stored behind one cache.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub use memory::MemoryCache;

/// Cache layer trait
///
/// Note: due to the generic methods this trait cannot be used as a trait
/// object; services hold the concrete `Arc<MemoryCache>`.
#[async_trait]
pub trait CacheLayer: Send + Sync {
    /// Get a value from cache
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;

    /// Set a value in cache
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> Result<()>;

    /// Delete a value from cache
    async fn delete(&self, key: &str) -> Result<()>;

    /// Clear all cache entries
    async fn clear(&self) -> Result<()>;
}

/// Create the in-memory cache with the given entry TTL.
pub fn create_cache(ttl: Duration) -> Arc<MemoryCache> {
    Arc::new(MemoryCache::with_capacity_and_ttl(10_000, ttl))
}
