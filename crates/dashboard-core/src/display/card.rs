//! View models handed to the formatters

use super::format::{
    NOT_AVAILABLE, Trend, format_change, format_percent, format_price, format_timestamp,
    format_volume,
};
use crate::engine::{ConfidenceLevel, FilterState, FilteredView, Summary};
use crate::models::{StockFeed, StockRecord};
use serde::Serialize;

/// Shown instead of cards when nothing passes the filter
pub const EMPTY_STATE_MESSAGE: &str = "No stocks match the current filters.";

/// Banner prefix when the sample feed is on screen
pub const DEGRADED_BANNER: &str = "Live data unavailable. Showing sample data";

/// One stock, formatted for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockCard {
    pub ticker: String,
    pub name: String,
    pub region: String,
    pub price: String,
    pub change: String,
    pub change_percent: String,
    pub trend: Trend,
    pub trend_class: &'static str,
    pub volume: String,
    /// Width of the score bar in percent
    pub score: u32,
    /// `"N/A"` when the feed carried no score
    pub score_label: String,
    pub level: ConfidenceLevel,
    pub catalyst: Option<String>,
    pub analysis: Option<String>,
    pub data_source: Option<String>,
}

impl StockCard {
    pub fn from_record(record: &StockRecord) -> Self {
        let score = record.effective_score();
        let trend = Trend::from_change(record.price_change_percent);

        Self {
            ticker: record.ticker.clone(),
            name: record.display_name().to_string(),
            region: record.region.clone(),
            price: format_price(record.current_price),
            change: format_change(record.price_change),
            change_percent: format_percent(record.price_change_percent),
            trend,
            trend_class: trend.css_class(),
            volume: format_volume(record.volume),
            score,
            score_label: record
                .confidence_score
                .map_or_else(|| NOT_AVAILABLE.to_string(), |_| score.to_string()),
            level: ConfidenceLevel::from_score(score),
            catalyst: record.catalyst.clone(),
            analysis: record.analysis.clone(),
            data_source: record.data_source.clone(),
        }
    }
}

/// Everything a formatter needs to draw one screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    pub cards: Vec<StockCard>,
    pub summary: Summary,
    pub region: String,
    pub search_term: String,
    /// Regions present in the loaded feed, for the selector
    pub regions: Vec<String>,
    pub last_updated: String,
    pub banner: Option<String>,
    pub empty_message: Option<&'static str>,
}

impl DashboardPage {
    pub fn new(
        view: &FilteredView<'_>,
        filter: &FilterState,
        feed: &StockFeed,
        degraded: Option<&str>,
    ) -> Self {
        Self {
            cards: view.records.iter().map(|r| StockCard::from_record(r)).collect(),
            summary: view.summary,
            region: filter.region.to_string(),
            search_term: filter.search_term().to_string(),
            regions: feed.regions().into_iter().map(str::to_string).collect(),
            last_updated: format_timestamp(feed.last_updated_at()),
            banner: degraded.map(|reason| format!("{DEGRADED_BANNER} ({reason})")),
            empty_message: view.is_empty().then_some(EMPTY_STATE_MESSAGE),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.banner.is_some()
    }
}
