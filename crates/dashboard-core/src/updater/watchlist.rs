//! Tickers tracked per region

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionWatch {
    pub region: String,
    pub tickers: Vec<String>,
}

/// Ordered list of regions and their tickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watchlist {
    regions: Vec<RegionWatch>,
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::from_pairs([
            ("US", &["AAPL", "MSFT", "TSLA", "NVDA", "GOOGL", "META", "AMD", "AMZN"][..]),
            ("UK", &["TSCO.L", "HSBA.L", "LLOY.L", "VOD.L", "BARC.L", "BP.L"][..]),
            ("EU", &["AIR.PA", "SIE.DE", "ASML.AS", "SAF.PA", "BMW.DE", "DB1.DE"][..]),
        ])
    }
}

impl Watchlist {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let regions = pairs
            .into_iter()
            .map(|(region, tickers)| RegionWatch {
                region: region.to_string(),
                tickers: tickers.iter().map(|t| t.to_uppercase()).collect(),
            })
            .collect();
        Self { regions }
    }

    /// Read `[{"region": "US", "tickers": [...]}, ...]` from a JSON file
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let payload = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DashboardError::io(path.display().to_string(), e))?;
        let watchlist: Self = serde_json::from_str(&payload)?;
        if watchlist.is_empty() {
            return Err(DashboardError::ConfigError(format!(
                "watchlist {} has no tickers",
                path.display()
            )));
        }
        Ok(watchlist)
    }

    pub fn regions(&self) -> &[RegionWatch] {
        &self.regions
    }

    /// `(region, ticker)` pairs in watchlist order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.regions.iter().flat_map(|watch| {
            watch
                .tickers
                .iter()
                .map(move |ticker| (watch.region.as_str(), ticker.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.regions.iter().map(|w| w.tickers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
