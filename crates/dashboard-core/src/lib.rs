//! Stock dashboard core
//!
//! This crate loads a stock feed and turns it into filtered, summarised views.
//! It includes:
//!
//! - Feed loading from a local file or HTTP(S) URL, with retries and a TTL cache
//! - A fixed sample feed shown whenever the primary feed is unavailable
//! - Region and free-text filtering with count, high-confidence and average-score summaries
//! - Table, JSON and HTML rendering of the filtered view
//! - A feed updater that rebuilds the feed from Yahoo Finance daily closes
//!
//! # Architecture
//!
//! - `DataLoader`: reads the feed through a [`FeedSource`] and falls back to sample data
//! - [`apply`]: pure filter and aggregate step producing a [`FilteredView`]
//! - `AppState`: filter selection plus the loaded feed, driven by [`Event`]s
//! - `Formatter`: renders a [`DashboardPage`] for the terminal, JSON or HTML
//!
//! # Example
//!
//! ```rust,ignore
//! use dashboard_core::{DashboardConfig, DataLoader, FilterState, apply};
//!
//! #[tokio::main]
//! async fn main() -> dashboard_core::Result<()> {
//!     let config = DashboardConfig::builder().with_env().build()?;
//!     let loader = DataLoader::from_config(&config)?;
//!
//!     let outcome = loader.load_or_fallback().await;
//!     let filter = FilterState::default().with_region("US");
//!     let view = apply(&outcome.feed.stocks, &filter);
//!
//!     println!("{} stocks, average score {}", view.summary.total_count, view.summary.average_score);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod interface;
pub mod loader;
pub mod models;
pub mod updater;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use display::{DashboardPage, StockCard};
pub use engine::{FilterState, FilteredView, RegionFilter, Summary, apply};
pub use error::{DashboardError, Result};
pub use interface::{AppState, Command, Effect, Event, Formatter, FormatterFactory, OutputFormat};
pub use loader::{DataLoader, FeedSource, LoadOutcome, sample_feed};
pub use models::{StockFeed, StockRecord};
pub use updater::{FeedUpdater, Watchlist};
