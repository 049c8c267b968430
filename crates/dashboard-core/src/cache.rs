//! Time-bounded cache of loaded feeds, keyed by source location

use crate::models::StockFeed;
use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Thread-safe cache for loaded feeds
pub struct FeedCache {
    cache: Arc<RwLock<TimedCache<String, StockFeed>>>,
}

impl FeedCache {
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a feed from the cache
    pub async fn get(&self, source: &str) -> Option<StockFeed> {
        let mut cache = self.cache.write().await;
        cache.cache_get(source).cloned()
    }

    /// Insert a feed into the cache
    pub async fn insert(&self, source: impl Into<String>, feed: StockFeed) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(source.into(), feed);
    }

    /// Get or fetch a feed using the provided fetcher function
    ///
    /// Only successful fetches are cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, source: &str, fetcher: F) -> Result<StockFeed, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<StockFeed, E>>,
    {
        if let Some(feed) = self.get(source).await {
            tracing::debug!(source, "Feed cache hit");
            return Ok(feed);
        }

        tracing::debug!(source, "Feed cache miss");

        let feed = fetcher().await?;
        self.insert(source, feed.clone()).await;

        Ok(feed)
    }

    /// Invalidate a specific cache entry
    pub async fn invalidate(&self, source: &str) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_remove(source);
    }
}

impl Clone for FeedCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}
