use std::time::Duration;

use async_trait::async_trait;
use im_core::{Error, Result};

use crate::config::ScrapeConfig;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the response body as text
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// `reqwest`-backed fetcher; non-success statuses are errors.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Runs `fetcher` under a deadline so no fetcher can block a run indefinitely.
pub async fn fetch_with_timeout(fetcher: &dyn Fetcher, url: &str, timeout: Duration) -> Result<String> {
    match tokio::time::timeout(timeout, fetcher.fetch(url)).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(format!("{} after {:?}", url, timeout))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockFetcher;

    #[tokio::test]
    async fn test_fetch_with_timeout_passes_body_through() {
        let fetcher = MockFetcher::new().with_body("https://example.com/a", "hello");
        let body = fetch_with_timeout(&fetcher, "https://example.com/a", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_fetch_with_timeout_expires() {
        let fetcher = MockFetcher::new().with_delayed_body(
            "https://example.com/slow",
            "late",
            Duration::from_secs(5),
        );
        let err = fetch_with_timeout(&fetcher, "https://example.com/slow", Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
    }

    #[test]
    fn test_http_fetcher_builds_from_config() {
        assert!(HttpFetcher::new(&ScrapeConfig::default()).is_ok());
    }
}
