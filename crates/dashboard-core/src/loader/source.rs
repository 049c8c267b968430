//! Feed sources: a local JSON file or an HTTP endpoint

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::models::StockFeed;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Where a feed comes from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the feed
    async fn fetch(&self) -> Result<StockFeed>;

    /// Human-readable location, also used as the cache key
    fn describe(&self) -> String;
}

/// Build the source matching `location`: http(s) URLs go over the network,
/// anything else is read as a file path
pub fn open_source(location: &str, config: &DashboardConfig) -> Result<Arc<dyn FeedSource>> {
    let location = location.trim();
    if location.is_empty() {
        return Err(DashboardError::InvalidSource("empty location".to_string()));
    }

    match Url::parse(location) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(Arc::new(HttpSource::new(url, config)?))
        },
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| DashboardError::InvalidSource(location.to_string()))?;
            Ok(Arc::new(FileSource::new(path)))
        },
        // Windows drive letters parse as one-letter schemes.
        Ok(url) if url.scheme().len() > 1 => Err(DashboardError::InvalidSource(format!(
            "unsupported scheme '{}' in {location}",
            url.scheme()
        ))),
        _ => Ok(Arc::new(FileSource::new(location))),
    }
}

/// Feed stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileSource {
    async fn fetch(&self) -> Result<StockFeed> {
        debug!(path = %self.path.display(), "Reading feed file");
        let payload = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DashboardError::io(self.path.display().to_string(), e))?;
        StockFeed::from_json(&payload)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Feed served by an HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: Url,
    config: DashboardConfig,
}

impl HttpSource {
    pub fn new(url: Url, config: &DashboardConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("stock-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url,
            config: config.clone(),
        })
    }

    async fn fetch_once(&self) -> Result<StockFeed> {
        let response = self.client.get(self.url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(DashboardError::HttpStatus {
                status: response.status().as_u16(),
                url: self.url.to_string(),
            });
        }

        let payload = response.text().await?;
        StockFeed::from_json(&payload)
    }
}

#[async_trait]
impl FeedSource for HttpSource {
    async fn fetch(&self) -> Result<StockFeed> {
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(feed) => return Ok(feed),
                Err(e) if e.is_transient() && attempt + 1 < self.config.max_retries => {
                    let backoff = self.config.retry_backoff(attempt);
                    warn!(
                        url = %self.url,
                        attempt = attempt + 1,
                        error = %e,
                        "Feed request failed, retrying in {:?}",
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                },
                Err(e) => return Err(e),
            }
        }
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_config() -> DashboardConfig {
        DashboardConfig::builder()
            .max_retries(3)
            .retry_backoff_base(Duration::from_millis(1))
            .request_timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    fn feed_body() -> serde_json::Value {
        json!({
            "last_updated": "2024-05-01T14:30:00",
            "stocks": [
                {"ticker": "AAPL", "region": "US", "confidence_score": 82},
                {"ticker": "TSCO.L", "region": "UK", "confidence_score": 68}
            ]
        })
    }

    #[test]
    fn test_open_source_picks_kind() {
        let config = DashboardConfig::default();

        let http = open_source("https://example.com/stocks.json", &config).unwrap();
        assert_eq!(http.describe(), "https://example.com/stocks.json");

        let file = open_source("data/processed/latest_stocks.json", &config).unwrap();
        assert_eq!(file.describe(), "data/processed/latest_stocks.json");

        assert!(open_source("ftp://example.com/stocks.json", &config).is_err());
        assert!(open_source("  ", &config).is_err());
    }

    #[tokio::test]
    async fn test_file_source_reads_feed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", feed_body()).unwrap();

        let source = FileSource::new(file.path());
        let feed = source.fetch().await.unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.stocks[0].ticker, "AAPL");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/definitely/not/here.json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, DashboardError::Io { .. }));
    }

    #[tokio::test]
    async fn test_http_source_fetches_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stocks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/stocks.json", server.uri())).unwrap();
        let source = HttpSource::new(url, &fast_config()).unwrap();
        let feed = source.fetch().await.unwrap();
        assert_eq!(feed.len(), 2);
    }

    #[tokio::test]
    async fn test_http_source_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stocks.json"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/stocks.json", server.uri())).unwrap();
        let source = HttpSource::new(url, &fast_config()).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, DashboardError::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_http_source_does_not_retry_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing.json", server.uri())).unwrap();
        let source = HttpSource::new(url, &fast_config()).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, DashboardError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_http_source_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let source = HttpSource::new(url, &fast_config()).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, DashboardError::JsonError(_)));
    }
}
