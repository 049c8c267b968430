//! Builds a fresh feed for every ticker on the watchlist

use super::scoring::{DEFAULT_CATALYST, analysis_comment, confidence_score};
use super::watchlist::Watchlist;
use crate::api::{DailySnapshot, QuoteProvider};
use crate::error::{DashboardError, Result};
use crate::models::{StockFeed, StockRecord};
use chrono::Utc;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const DATA_SOURCE: &str = "Yahoo Finance";

pub struct FeedUpdater {
    provider: Arc<dyn QuoteProvider>,
    watchlist: Watchlist,
    rate_limiter: SharedRateLimiter,
}

impl FeedUpdater {
    /// Create an updater issuing at most `rate_limit` quote requests per minute
    pub fn new(provider: Arc<dyn QuoteProvider>, watchlist: Watchlist, rate_limit: u32) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            provider,
            watchlist,
            rate_limiter,
        }
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    /// Turn a snapshot into a scored feed record
    ///
    /// The company name falls back to the ticker when the lookup found none.
    pub fn record_from_snapshot(snapshot: DailySnapshot, region: &str) -> StockRecord {
        let score = confidence_score(snapshot.price_change_percent, snapshot.volume);
        let company_name = snapshot
            .company_name
            .unwrap_or_else(|| snapshot.ticker.clone());
        StockRecord {
            company_name: Some(company_name),
            volume: Some(snapshot.volume),
            confidence_score: Some(score),
            analysis: Some(analysis_comment(score).to_string()),
            catalyst: Some(DEFAULT_CATALYST.to_string()),
            data_source: Some(DATA_SOURCE.to_string()),
            ..StockRecord::new(snapshot.ticker, region).with_price(
                snapshot.current_price,
                snapshot.price_change,
                snapshot.price_change_percent,
            )
        }
    }

    /// Fetch every watchlist ticker; failures are logged and skipped
    pub async fn build_feed(&self) -> StockFeed {
        let mut stocks = Vec::with_capacity(self.watchlist.len());

        for (region, ticker) in self.watchlist.entries() {
            self.rate_limiter.until_ready().await;
            info!(ticker, region, "Fetching daily snapshot");

            match self.provider.daily_snapshot(ticker).await {
                Ok(snapshot) => {
                    let name = self.lookup_company_name(ticker).await;
                    let snapshot = snapshot.with_company_name(name);
                    stocks.push(Self::record_from_snapshot(snapshot, region));
                },
                Err(e) => warn!(ticker, error = %e, "Skipping ticker"),
            }
        }

        StockFeed {
            last_updated: Some(Utc::now().to_rfc3339()),
            stocks,
        }
    }

    async fn lookup_company_name(&self, ticker: &str) -> Option<String> {
        self.rate_limiter.until_ready().await;
        match self.provider.company_name(ticker).await {
            Ok(name) => name,
            Err(e) => {
                warn!(ticker, error = %e, "Company name lookup failed, using ticker");
                None
            },
        }
    }

    /// Build the feed and write it to `path`
    ///
    /// Nothing is written when every ticker failed, so a previous good file
    /// stays in place.
    pub async fn update(&self, path: impl AsRef<Path>) -> Result<StockFeed> {
        let feed = self.build_feed().await;
        if feed.is_empty() {
            return Err(DashboardError::EmptyFeed(
                "watchlist update (no ticker returned data)".to_string(),
            ));
        }
        write_feed(&feed, path.as_ref()).await?;
        info!(
            path = %path.as_ref().display(),
            records = feed.len(),
            "Updated stock feed"
        );
        Ok(feed)
    }
}

/// Write `feed` as pretty JSON, creating parent directories
pub async fn write_feed(feed: &StockFeed, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DashboardError::io(parent.display().to_string(), e))?;
    }

    let json = feed.to_json_pretty()?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| DashboardError::io(path.display().to_string(), e))
}
