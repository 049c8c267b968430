//! Yahoo Finance API client

use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

/// Days of daily history requested to find the last two sessions
const HISTORY_WINDOW_DAYS: i64 = 7;

/// Daily price bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub volume: u64,
}

/// Latest session compared with the one before it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub ticker: String,
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub volume: u64,
    /// Long company name when the name lookup succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl DailySnapshot {
    /// Derive the day's move from two consecutive closes, rounded to cents
    pub fn from_closes(ticker: &str, previous_close: f64, close: f64, volume: u64) -> Result<Self> {
        if !(previous_close.is_finite() && close.is_finite()) || previous_close == 0.0 {
            return Err(DashboardError::DataUnavailable {
                symbol: ticker.to_string(),
                reason: format!("unusable closes {previous_close} -> {close}"),
            });
        }

        let change = close - previous_close;
        Ok(Self {
            ticker: ticker.to_string(),
            current_price: round2(close),
            price_change: round2(change),
            price_change_percent: round2(change / previous_close * 100.0),
            volume,
            company_name: None,
        })
    }

    /// Snapshot from the last two bars of a daily series
    pub fn from_quotes(ticker: &str, quotes: &[Quote]) -> Result<Self> {
        match quotes {
            [.., previous, latest] => {
                Self::from_closes(ticker, previous.close, latest.close, latest.volume)
            },
            _ => Err(DashboardError::DataUnavailable {
                symbol: ticker.to_string(),
                reason: format!("need two daily closes, got {}", quotes.len()),
            }),
        }
    }

    pub fn with_company_name(mut self, name: Option<String>) -> Self {
        self.company_name = name;
        self
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Source of daily snapshots for the feed updater
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn daily_snapshot(&self, ticker: &str) -> Result<DailySnapshot>;

    /// Company name for `ticker`, `None` when the lookup has no usable name
    async fn company_name(&self, ticker: &str) -> Result<Option<String>>;
}

/// Long name of the search hit for `ticker`, then its short name
///
/// Prefers the hit whose symbol equals the ticker and falls back to the first
/// hit.
pub fn company_name_from_search(ticker: &str, quotes: &[yahoo::YQuoteItemOpt]) -> Option<String> {
    let hit = quotes
        .iter()
        .find(|q| q.symbol.eq_ignore_ascii_case(ticker))
        .or_else(|| quotes.first())?;

    [hit.long_name.as_deref(), hit.short_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

/// Yahoo Finance API client
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    /// Get daily quotes for a symbol between two instants
    pub async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;

        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp()).map_err(|e| {
            DashboardError::YahooFinanceError(format!("Invalid start timestamp: {e}"))
        })?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp()).map_err(|e| {
            DashboardError::YahooFinanceError(format!("Invalid end timestamp: {e}"))
        })?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;

        Ok(quotes
            .iter()
            .map(|q| Quote {
                symbol: symbol.to_string(),
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                close: q.close,
                volume: q.volume,
            })
            .collect())
    }
}

#[async_trait]
impl QuoteProvider for YahooFinanceClient {
    async fn daily_snapshot(&self, ticker: &str) -> Result<DailySnapshot> {
        let end = Utc::now();
        let start = end - chrono::Duration::days(HISTORY_WINDOW_DAYS);
        let quotes = self.get_historical_quotes(ticker, start, end).await?;
        DailySnapshot::from_quotes(ticker, &quotes)
    }

    async fn company_name(&self, ticker: &str) -> Result<Option<String>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;
        let result = provider
            .search_ticker_opt(ticker)
            .await
            .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;
        Ok(company_name_from_search(ticker, &result.quotes))
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}
