//! Formatting of filtered views for display

pub mod card;
pub mod format;

pub use card::{DEGRADED_BANNER, DashboardPage, EMPTY_STATE_MESSAGE, StockCard};
pub use format::{
    NOT_AVAILABLE, Trend, format_change, format_percent, format_price, format_timestamp,
    format_volume,
};
