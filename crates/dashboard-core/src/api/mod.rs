//! Market data clients used by the feed updater

pub mod yahoo;

pub use yahoo::{DailySnapshot, QuoteProvider, YahooFinanceClient};
