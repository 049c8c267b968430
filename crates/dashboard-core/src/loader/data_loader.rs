//! Feed loading with caching and fallback

use super::fallback::sample_feed;
use super::source::{FeedSource, open_source};
use crate::cache::FeedCache;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::models::StockFeed;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Result of a load that always produces something to show
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub feed: StockFeed,
    /// Why sample data is shown instead of the live feed
    pub degraded: Option<String>,
}

impl LoadOutcome {
    pub fn live(feed: StockFeed) -> Self {
        Self {
            feed,
            degraded: None,
        }
    }

    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            feed: sample_feed(),
            degraded: Some(reason.into()),
        }
    }

    /// Substitute the sample feed for any load error
    pub fn from_result(result: Result<StockFeed>) -> Self {
        match result {
            Ok(feed) => Self::live(feed),
            Err(e) => {
                warn!(error = %e, "Primary feed unavailable, showing sample data");
                Self::fallback(e.to_string())
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Loads the feed from its primary source
pub struct DataLoader {
    source: Arc<dyn FeedSource>,
    source_key: String,
    cache: FeedCache,
}

impl DataLoader {
    pub fn new(source: Arc<dyn FeedSource>, cache_ttl: Duration) -> Self {
        let source_key = source.describe();
        Self {
            source,
            source_key,
            cache: FeedCache::new(cache_ttl),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        config.validate()?;
        let source = open_source(&config.source, config)?;
        Ok(Self::new(source, config.cache_ttl))
    }

    /// Location of the primary source
    pub fn source(&self) -> &str {
        &self.source_key
    }

    /// Load the feed, reusing a cached copy while it is fresh
    ///
    /// An empty feed is an error so that callers fall back to sample data.
    pub async fn load(&self) -> Result<StockFeed> {
        self.cache
            .get_or_fetch(&self.source_key, || async {
                let feed = self.source.fetch().await?;
                if feed.is_empty() {
                    return Err(DashboardError::EmptyFeed(self.source_key.clone()));
                }
                info!(
                    source = %self.source_key,
                    records = feed.len(),
                    last_updated = feed.last_updated.as_deref().unwrap_or("unknown"),
                    "Loaded stock feed"
                );
                Ok::<_, DashboardError>(feed)
            })
            .await
    }

    /// Drop any cached copy and load again
    pub async fn reload(&self) -> Result<StockFeed> {
        self.cache.invalidate(&self.source_key).await;
        self.load().await
    }

    pub async fn load_or_fallback(&self) -> LoadOutcome {
        LoadOutcome::from_result(self.load().await)
    }

    pub async fn reload_or_fallback(&self) -> LoadOutcome {
        LoadOutcome::from_result(self.reload().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::source::MockFeedSource;
    use crate::models::StockRecord;

    fn live_feed() -> StockFeed {
        StockFeed::new(vec![
            StockRecord::new("AAPL", "US").with_score(82),
            StockRecord::new("MSFT", "US").with_score(76),
        ])
    }

    fn mock_source(times: usize, result: fn() -> Result<StockFeed>) -> MockFeedSource {
        let mut source = MockFeedSource::new();
        source
            .expect_describe()
            .return_const("mock://feed".to_string());
        source.expect_fetch().times(times).returning(result);
        source
    }

    #[tokio::test]
    async fn test_load_returns_live_feed() {
        let loader = DataLoader::new(
            Arc::new(mock_source(1, || Ok(live_feed()))),
            Duration::from_secs(60),
        );

        let outcome = loader.load_or_fallback().await;
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.feed, live_feed());
        assert_eq!(loader.source(), "mock://feed");
    }

    #[tokio::test]
    async fn test_load_uses_cache_until_reload() {
        let loader = DataLoader::new(
            Arc::new(mock_source(2, || Ok(live_feed()))),
            Duration::from_secs(60),
        );

        loader.load().await.unwrap();
        loader.load().await.unwrap();
        loader.reload().await.unwrap();
    }

    #[tokio::test]
    async fn test_source_error_falls_back() {
        let loader = DataLoader::new(
            Arc::new(mock_source(1, || {
                Err(DashboardError::HttpStatus {
                    status: 502,
                    url: "mock://feed".to_string(),
                })
            })),
            Duration::from_secs(60),
        );

        let outcome = loader.load_or_fallback().await;
        assert!(outcome.is_degraded());
        assert_eq!(outcome.feed, sample_feed());
        assert!(outcome.degraded.unwrap().contains("502"));
    }

    #[tokio::test]
    async fn test_empty_feed_falls_back() {
        let loader = DataLoader::new(
            Arc::new(mock_source(1, || Ok(StockFeed::default()))),
            Duration::from_secs(60),
        );

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, DashboardError::EmptyFeed(_)));
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let loader = DataLoader::new(
            Arc::new(mock_source(2, || Ok(StockFeed::default()))),
            Duration::from_secs(60),
        );

        assert!(loader.load_or_fallback().await.is_degraded());
        assert!(loader.load_or_fallback().await.is_degraded());
    }

    #[test]
    fn test_from_config_with_missing_file_degrades() {
        let config = DashboardConfig::builder()
            .source("/definitely/not/here.json")
            .build()
            .unwrap();
        let loader = DataLoader::from_config(&config).unwrap();

        let outcome = tokio_test::block_on(loader.load_or_fallback());
        assert!(outcome.is_degraded());
        assert!(!outcome.feed.is_empty());
    }
}
