//! Stock records and the feed envelope they arrive in

use super::lenient;
use crate::error::{DashboardError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A single stock as supplied by the feed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockRecord {
    /// Short uppercase identifier, e.g. `AAPL` or `TSCO.L`
    pub ticker: String,

    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_name: Option<String>,

    /// Market tag used for exact-match filtering
    #[serde(default, deserialize_with = "lenient::string")]
    pub region: String,

    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_change: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_change_percent: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient::unsigned",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume: Option<u64>,

    /// Opaque 0-100 ranking signal
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence_score: Option<i64>,

    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub catalyst: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub analysis: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_source: Option<String>,
}

impl StockRecord {
    pub fn new(ticker: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            region: region.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.confidence_score = Some(score);
        self
    }

    pub fn with_price(mut self, price: f64, change: f64, change_percent: f64) -> Self {
        self.current_price = Some(price);
        self.price_change = Some(change);
        self.price_change_percent = Some(change_percent);
        self
    }

    /// `name`, then `company_name`, then the ticker
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.company_name.as_deref())
            .unwrap_or(&self.ticker)
    }

    /// Score clamped to 0..=100; missing counts as 0
    pub fn effective_score(&self) -> u32 {
        self.confidence_score.map_or(0, |s| s.clamp(0, 100) as u32)
    }
}

/// Feed envelope: `{ "last_updated": ..., "stocks": [...] }`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockFeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(default)]
    pub stocks: Vec<StockRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPayload {
    // Tried first: a derived struct would also accept a JSON array.
    Bare(Vec<Value>),
    Envelope {
        #[serde(default, deserialize_with = "lenient::text")]
        last_updated: Option<String>,
        #[serde(default)]
        stocks: Vec<Value>,
    },
}

impl StockFeed {
    pub fn new(stocks: Vec<StockRecord>) -> Self {
        Self {
            last_updated: None,
            stocks,
        }
    }

    /// Parse a feed payload, skipping individual records that cannot be read
    ///
    /// Accepts the envelope object or a bare array of records.
    pub fn from_json(payload: &str) -> Result<Self> {
        let raw: RawPayload = serde_json::from_str(payload)?;
        let (last_updated, values) = match raw {
            RawPayload::Envelope {
                last_updated,
                stocks,
            } => (last_updated, stocks),
            RawPayload::Bare(stocks) => (None, stocks),
        };

        let mut stocks = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<StockRecord>(value) {
                Ok(record) if !record.ticker.trim().is_empty() => stocks.push(record),
                Ok(_) => warn!(index, "Skipping stock record with empty ticker"),
                Err(e) => warn!(index, error = %e, "Skipping malformed stock record"),
            }
        }

        Ok(Self {
            last_updated,
            stocks,
        })
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(DashboardError::from)
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    /// Parsed `last_updated`; naive timestamps are read as UTC
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_updated.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Distinct regions in first-seen order
    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = Vec::new();
        for record in &self.stocks {
            if !record.region.is_empty() && !regions.contains(&record.region.as_str()) {
                regions.push(&record.region);
            }
        }
        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const SAMPLE: &str = r#"{
        "last_updated": "2024-05-01T14:30:00.123456",
        "stocks": [
            {
                "ticker": "AAPL",
                "company_name": "Apple Inc.",
                "region": "US",
                "current_price": 189.84,
                "price_change": 2.11,
                "price_change_percent": 1.12,
                "volume": 51234000,
                "confidence_score": 75,
                "catalyst": "Technical momentum and volume analysis",
                "analysis": "Strong momentum with positive technical indicators. High conviction setup."
            },
            {
                "ticker": "TSCO.L",
                "name": "Tesco PLC",
                "region": "UK",
                "current_price": null,
                "confidence_score": "68"
            }
        ]
    }"#;

    #[test]
    fn test_parse_envelope() {
        let feed = StockFeed::from_json(SAMPLE).unwrap();
        assert_eq!(feed.len(), 2);

        let apple = &feed.stocks[0];
        assert_eq!(apple.ticker, "AAPL");
        assert_eq!(apple.display_name(), "Apple Inc.");
        assert_eq!(apple.volume, Some(51_234_000));
        assert_eq!(apple.confidence_score, Some(75));

        let tesco = &feed.stocks[1];
        assert_eq!(tesco.display_name(), "Tesco PLC");
        assert_eq!(tesco.current_price, None);
        assert_eq!(tesco.confidence_score, Some(68));
    }

    #[test]
    fn test_parse_bare_array() {
        let feed = StockFeed::from_json(r#"[{"ticker": "MSFT", "region": "US"}]"#).unwrap();
        assert_eq!(feed.len(), 1);
        assert!(feed.last_updated.is_none());
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        let payload = r#"{"stocks": [
            {"ticker": "AAPL", "region": "US"},
            {"region": "US"},
            {"ticker": "", "region": "US"},
            "not-an-object",
            {"ticker": "MSFT", "region": "US", "current_price": "oops"}
        ]}"#;
        let feed = StockFeed::from_json(payload).unwrap();
        let tickers: Vec<_> = feed.stocks.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT"]);
        assert_eq!(feed.stocks[1].current_price, None);
    }

    #[test]
    fn test_null_or_non_string_region_keeps_record() {
        let payload = r#"[
            {"ticker": "AAPL", "region": null, "confidence_score": 82},
            {"ticker": "MSFT", "region": "US"},
            {"ticker": "SAP", "region": 49}
        ]"#;
        let feed = StockFeed::from_json(payload).unwrap();
        let tickers: Vec<_> = feed.stocks.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT", "SAP"]);
        assert_eq!(feed.stocks[0].region, "");
        assert_eq!(feed.stocks[0].confidence_score, Some(82));
        assert_eq!(feed.stocks[2].region, "");
    }

    #[test]
    fn test_invalid_payload_is_error() {
        assert!(StockFeed::from_json("<html>").is_err());
        assert!(StockFeed::from_json(r#""just a string""#).is_err());
    }

    #[test]
    fn test_display_name_falls_back_to_ticker() {
        let record = StockRecord::new("NVDA", "US");
        assert_eq!(record.display_name(), "NVDA");
    }

    #[test]
    fn test_effective_score_clamps() {
        assert_eq!(StockRecord::new("A", "US").effective_score(), 0);
        assert_eq!(StockRecord::new("A", "US").with_score(140).effective_score(), 100);
        assert_eq!(StockRecord::new("A", "US").with_score(-3).effective_score(), 0);
        assert_eq!(StockRecord::new("A", "US").with_score(64).effective_score(), 64);
    }

    #[test]
    fn test_last_updated_formats() {
        let feed = StockFeed::from_json(SAMPLE).unwrap();
        let at = feed.last_updated_at().unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2024, 5, 1));
        assert_eq!((at.hour(), at.minute()), (14, 30));

        let feed = StockFeed {
            last_updated: Some("2024-05-01T09:00:00+02:00".to_string()),
            stocks: Vec::new(),
        };
        assert_eq!(feed.last_updated_at().unwrap().hour(), 7);

        let feed = StockFeed {
            last_updated: Some("yesterday".to_string()),
            stocks: Vec::new(),
        };
        assert!(feed.last_updated_at().is_none());
    }

    #[test]
    fn test_round_trip_omits_absent_fields() {
        let feed = StockFeed::new(vec![StockRecord::new("AMD", "US").with_score(60)]);
        let json = feed.to_json_pretty().unwrap();
        assert!(json.contains("\"confidence_score\": 60"));
        assert!(!json.contains("current_price"));
        assert!(!json.contains("last_updated"));
    }

    #[test]
    fn test_regions_in_first_seen_order() {
        let feed = StockFeed::new(vec![
            StockRecord::new("AAPL", "US"),
            StockRecord::new("BP.L", "UK"),
            StockRecord::new("MSFT", "US"),
            StockRecord::new("SIE.DE", "EU"),
        ]);
        assert_eq!(feed.regions(), vec!["US", "UK", "EU"]);
    }
}
