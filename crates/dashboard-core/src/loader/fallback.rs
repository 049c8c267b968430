//! Fixed sample records shown when the primary feed is unavailable

use crate::models::{StockFeed, StockRecord};
use crate::updater::{DEFAULT_CATALYST, analysis_comment};

const SAMPLE_SOURCE: &str = "Sample data";

fn sample(
    ticker: &str,
    name: &str,
    region: &str,
    price: (f64, f64, f64),
    score: i64,
) -> StockRecord {
    let (current, change, percent) = price;
    StockRecord {
        name: Some(name.to_string()),
        catalyst: Some(DEFAULT_CATALYST.to_string()),
        analysis: Some(analysis_comment(score).to_string()),
        data_source: Some(SAMPLE_SOURCE.to_string()),
        ..StockRecord::new(ticker, region)
            .with_price(current, change, percent)
            .with_score(score)
    }
}

/// The sample feed; never empty
pub fn sample_feed() -> StockFeed {
    StockFeed::new(vec![
        sample("AAPL", "Apple Inc.", "US", (189.84, 2.11, 1.12), 82),
        sample("MSFT", "Microsoft Corporation", "US", (415.50, 3.20, 0.78), 76),
        sample("NVDA", "NVIDIA Corporation", "US", (875.28, -12.40, -1.40), 61),
        sample("TSCO.L", "Tesco PLC", "UK", (298.40, 1.10, 0.37), 68),
        sample("HSBA.L", "HSBC Holdings plc", "UK", (652.30, -4.70, -0.72), 45),
        sample("ASML.AS", "ASML Holding N.V.", "EU", (912.60, 18.90, 2.11), 75),
    ])
}
