//! Rebuilds the feed file from live market data

pub mod feed_updater;
pub mod scoring;
pub mod watchlist;

pub use feed_updater::{FeedUpdater, write_feed};
pub use scoring::{DEFAULT_CATALYST, analysis_comment, confidence_score};
pub use watchlist::{RegionWatch, Watchlist};
