//! Region and search filtering

use super::summary::Summary;
use crate::models::StockRecord;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Sentinel accepted from user input for "every region"
pub const ALL_REGIONS: &str = "all";

/// Region part of the filter
///
/// Matching against a record's region is exact and case-sensitive:
/// `Only("us")` does not match a record tagged `"US"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegionFilter {
    #[default]
    All,
    Only(String),
}

impl RegionFilter {
    pub fn matches(&self, region: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == region,
        }
    }
}

impl FromStr for RegionFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL_REGIONS) {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_string()))
        }
    }
}

impl From<String> for RegionFilter {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(filter) => filter,
            Err(never) => match never {},
        }
    }
}

impl From<RegionFilter> for String {
    fn from(value: RegionFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_REGIONS),
            Self::Only(region) => f.write_str(region),
        }
    }
}

/// Current filter selection, owned by the front-end
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawFilterState")]
pub struct FilterState {
    pub region: RegionFilter,
    /// Always trimmed and lowercased; see [`FilterState::set_search`]
    search_term: String,
}

/// Wire shape of [`FilterState`]; normalised through [`FilterState::new`]
#[derive(Deserialize)]
struct RawFilterState {
    #[serde(default)]
    region: RegionFilter,
    #[serde(default)]
    search_term: String,
}

impl From<RawFilterState> for FilterState {
    fn from(raw: RawFilterState) -> Self {
        Self::new(raw.region, &raw.search_term)
    }
}

impl FilterState {
    pub fn new(region: RegionFilter, search: &str) -> Self {
        let mut state = Self {
            region,
            search_term: String::new(),
        };
        state.set_search(search);
        state
    }

    pub fn with_region(mut self, region: impl AsRef<str>) -> Self {
        self.set_region(region);
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.set_search(search);
        self
    }

    pub fn set_region(&mut self, region: impl AsRef<str>) {
        self.region = RegionFilter::from(region.as_ref().to_string());
    }

    pub fn set_search(&mut self, search: &str) {
        self.search_term = search.trim().to_lowercase();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// True when the filter keeps every record
    pub fn is_identity(&self) -> bool {
        self.region == RegionFilter::All && self.search_term.is_empty()
    }

    pub fn matches(&self, record: &StockRecord) -> bool {
        self.region.matches(&record.region) && self.matches_search(record)
    }

    fn matches_search(&self, record: &StockRecord) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let term = self.search_term.as_str();
        let contains = |field: &str| field.to_lowercase().contains(term);

        contains(record.ticker.as_str())
            || record.name.as_deref().is_some_and(contains)
            || record.company_name.as_deref().is_some_and(contains)
    }
}

/// Filtered records plus their summary
///
/// Borrows from the loaded record set; input order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    pub records: Vec<&'a StockRecord>,
    pub summary: Summary,
}

impl FilteredView<'_> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn tickers(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.ticker.as_str()).collect()
    }
}

/// Apply `filter` to `records`
pub fn apply<'a>(records: &'a [StockRecord], filter: &FilterState) -> FilteredView<'a> {
    let kept: Vec<&StockRecord> = records.iter().filter(|r| filter.matches(r)).collect();
    let summary = Summary::from_records(kept.iter().copied());

    FilteredView {
        records: kept,
        summary,
    }
}
