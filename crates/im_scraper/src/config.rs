use std::path::Path;
use std::time::Duration;

use im_core::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://www.infomoney.com.br/wp-json/wp/v2/posts";
pub const DEFAULT_CATEGORY_SEGMENT: &str = "/mercados/";
pub const DEFAULT_CONTENT_SELECTORS: [&str; 3] =
    ["div.article-content", "div.single-content", "article"];

/// Settings for one scrape run. Every field has a default, so a config file may be partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub api_base_url: String,
    pub per_page: u32,
    pub max_pages: u32,
    /// Substring a post's `link` must contain to be kept
    pub category_segment: String,
    /// Optional `categories=<id>` query filter, applied in addition to the segment check
    pub category_id: Option<u64>,
    /// Tried in order against each article page; the first one with text wins
    pub content_selectors: Vec<String>,
    pub request_timeout_secs: u64,
    pub page_concurrency: usize,
    pub post_concurrency: usize,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            per_page: 10,
            max_pages: 3,
            category_segment: DEFAULT_CATEGORY_SEGMENT.to_string(),
            category_id: None,
            content_selectors: DEFAULT_CONTENT_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            request_timeout_secs: 30,
            page_concurrency: 1,
            post_concurrency: 4,
            user_agent: concat!("im_scraper/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ScrapeConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_base_url)?;
        if self.max_pages == 0 {
            return Err(Error::Config("max_pages must be at least 1".to_string()));
        }
        if self.per_page == 0 {
            return Err(Error::Config("per_page must be at least 1".to_string()));
        }
        if self.category_segment.is_empty() {
            return Err(Error::Config("category_segment must not be empty".to_string()));
        }
        if self.content_selectors.is_empty() {
            return Err(Error::Config("at least one content selector is required".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be at least 1".to_string()));
        }
        if self.page_concurrency == 0 || self.post_concurrency == 0 {
            return Err(Error::Config("concurrency limits must be at least 1".to_string()));
        }
        Ok(())
    }
}
