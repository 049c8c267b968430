//! Loading the stock feed, with a sample-data fallback

pub mod data_loader;
pub mod fallback;
pub mod source;

pub use data_loader::{DataLoader, LoadOutcome};
pub use fallback::sample_feed;
pub use source::{FeedSource, FileSource, HttpSource, open_source};
