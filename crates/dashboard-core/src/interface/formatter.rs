//! Page rendering for the supported output formats

use crate::display::DashboardPage;
use crate::error::{DashboardError, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use minijinja::{Environment, HtmlEscape};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The `.html` suffix turns on minijinja's HTML auto-escaping.
const HTML_TEMPLATE_NAME: &str = "dashboard.html";

const HTML_TEMPLATE: &str = include_str!("templates/dashboard.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Html,
}

impl FromStr for OutputFormat {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            other => Err(DashboardError::ConfigError(format!(
                "Unknown output format: {other} (expected table, json or html)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Html => "html",
        })
    }
}

pub trait Formatter: Send + Sync {
    fn output_format(&self) -> OutputFormat;
    fn render_page(&self, page: &DashboardPage) -> Result<String>;
    fn format_error(&self, error: &str) -> String;
}

/// Terminal table
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn output_format(&self) -> OutputFormat {
        OutputFormat::Table
    }

    fn render_page(&self, page: &DashboardPage) -> Result<String> {
        let mut output = String::new();

        if let Some(banner) = &page.banner {
            output.push_str(&format!("⚠ {banner}\n"));
        }
        output.push_str(&format!(
            "Region: {} | Search: {} | Last updated: {}\n",
            page.region,
            if page.search_term.is_empty() { "-" } else { page.search_term.as_str() },
            page.last_updated
        ));

        if let Some(message) = page.empty_message {
            output.push_str(message);
            output.push('\n');
        } else {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![
                    "Ticker", "Name", "Region", "Price", "Change", "Change %", "Volume", "Score",
                ]);

            for card in &page.cards {
                table.add_row(vec![
                    Cell::new(&card.ticker),
                    Cell::new(&card.name),
                    Cell::new(&card.region),
                    Cell::new(&card.price).set_alignment(CellAlignment::Right),
                    Cell::new(format!("{} {}", card.trend.arrow(), card.change))
                        .set_alignment(CellAlignment::Right),
                    Cell::new(&card.change_percent).set_alignment(CellAlignment::Right),
                    Cell::new(&card.volume).set_alignment(CellAlignment::Right),
                    Cell::new(&card.score_label).set_alignment(CellAlignment::Right),
                ]);
            }
            output.push_str(&table.to_string());
            output.push('\n');
        }

        output.push_str(&format!(
            "Stocks: {} | High confidence: {} | Average score: {}\n",
            page.summary.total_count, page.summary.high_confidence_count, page.summary.average_score
        ));
        Ok(output)
    }

    fn format_error(&self, error: &str) -> String {
        format!("❌ Error: {error}")
    }
}

/// Pretty-printed page model
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn output_format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn render_page(&self, page: &DashboardPage) -> Result<String> {
        Ok(serde_json::to_string_pretty(page)?)
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({ "error": error }).to_string()
    }
}

/// Standalone HTML document
pub struct HtmlFormatter {
    env: Environment<'static>,
}

impl HtmlFormatter {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(HTML_TEMPLATE_NAME, HTML_TEMPLATE)?;
        Ok(Self { env })
    }
}

impl Formatter for HtmlFormatter {
    fn output_format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn render_page(&self, page: &DashboardPage) -> Result<String> {
        let template = self.env.get_template(HTML_TEMPLATE_NAME)?;
        Ok(template.render(page)?)
    }

    fn format_error(&self, error: &str) -> String {
        format!("<p class=\"error\">Error: {}</p>", HtmlEscape(error))
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(format: OutputFormat) -> Result<Box<dyn Formatter>> {
        Ok(match format {
            OutputFormat::Table => Box::new(TableFormatter),
            OutputFormat::Json => Box::new(JsonFormatter),
            OutputFormat::Html => Box::new(HtmlFormatter::new()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FilterState, apply};
    use crate::models::{StockFeed, StockRecord};

    fn page(filter: &FilterState, degraded: Option<&str>) -> DashboardPage {
        let feed = StockFeed::new(vec![
            StockRecord::new("AAPL", "US")
                .with_name("Apple <Inc>")
                .with_score(82)
                .with_price(1234.5, 2.11, 1.12),
            StockRecord::new("TSCO.L", "UK").with_score(68),
        ]);
        let view = apply(&feed.stocks, filter);
        DashboardPage::new(&view, filter, &feed, degraded)
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::Html.to_string(), "html");
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_table_output() {
        let output = TableFormatter
            .render_page(&page(&FilterState::default(), None))
            .unwrap();
        assert!(output.contains("AAPL"));
        assert!(output.contains("1,234.50"));
        assert!(output.contains("Stocks: 2 | High confidence: 1 | Average score: 75"));
        assert!(!output.contains('⚠'));
    }

    #[test]
    fn test_table_empty_state_and_banner() {
        let filter = FilterState::default().with_region("EU");
        let output = TableFormatter
            .render_page(&page(&filter, Some("timed out")))
            .unwrap();
        assert!(output.contains("No stocks match the current filters."));
        assert!(output.contains("timed out"));
        assert!(output.contains("Stocks: 0 | High confidence: 0 | Average score: 0"));
    }

    #[test]
    fn test_json_output() {
        let output = JsonFormatter
            .render_page(&page(&FilterState::default().with_search("tsco"), None))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["summary"]["total_count"], 1);
        assert_eq!(value["summary"]["average_score"], 68);
        assert_eq!(value["cards"][0]["ticker"], "TSCO.L");
        assert_eq!(value["cards"][0]["level"], "moderate");
    }

    #[test]
    fn test_html_output_is_escaped() {
        let formatter = FormatterFactory::create(OutputFormat::Html).unwrap();
        assert_eq!(formatter.output_format(), OutputFormat::Html);

        let output = formatter
            .render_page(&page(&FilterState::default(), Some("<script>")))
            .unwrap();
        assert!(output.contains("Apple &lt;Inc&gt;"));
        assert!(!output.contains("<script>"));
        assert!(output.contains("width: 82%"));
        assert!(output.contains("AAPL"));
    }

    #[test]
    fn test_html_empty_state() {
        let formatter = HtmlFormatter::new().unwrap();
        let output = formatter
            .render_page(&page(&FilterState::default().with_search("xyz"), None))
            .unwrap();
        assert!(output.contains("No stocks match the current filters."));
        assert!(!output.contains("class=\"banner\""));
    }

    #[test]
    fn test_format_error() {
        assert_eq!(TableFormatter.format_error("boom"), "❌ Error: boom");
        assert_eq!(JsonFormatter.format_error("boom"), r#"{"error":"boom"}"#);
        assert!(HtmlFormatter::new().unwrap().format_error("<b>").contains("&lt;b&gt;"));
    }

    #[test]
    fn test_html_error_matches_template_escaping() {
        let output = HtmlFormatter::new()
            .unwrap()
            .format_error(r#"<a href="x">AT&T</a>"#);
        assert!(output.starts_with("<p class=\"error\">Error: "));
        assert!(output.contains("&lt;a href=&quot;x&quot;&gt;AT&amp;T"));
        assert!(!output.contains("<a"));
    }
}
