use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use im_core::{Article, Result};
use serde_json::Value;
use url::Url;

use super::content::ContentFetcher;
use super::date::parse_publication_date;
use super::post::{extract_link, extract_raw_date, PostFields};
use crate::config::ScrapeConfig;
use crate::fetch::{fetch_with_timeout, Fetcher};
use crate::logging::Logger;

/// Fetches one page of the posts API and turns its in-category posts into articles.
#[derive(Clone)]
pub struct PageScraper {
    fetcher: Arc<dyn Fetcher>,
    content: ContentFetcher,
    base_url: Url,
    per_page: u32,
    category_segment: String,
    category_id: Option<u64>,
    timeout: Duration,
    post_concurrency: usize,
    logger: Logger,
}

impl PageScraper {
    pub fn new(config: &ScrapeConfig, fetcher: Arc<dyn Fetcher>, logger: Logger) -> Result<Self> {
        let content = ContentFetcher::new(
            fetcher.clone(),
            &config.content_selectors,
            config.request_timeout(),
            logger.clone(),
        )?;

        Ok(Self {
            fetcher,
            content,
            base_url: Url::parse(&config.api_base_url)?,
            per_page: config.per_page,
            category_segment: config.category_segment.clone(),
            category_id: config.category_id,
            timeout: config.request_timeout(),
            post_concurrency: config.post_concurrency.max(1),
            logger,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.content = self.content.with_timeout(timeout);
        self
    }

    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            if let Some(category_id) = self.category_id {
                query.append_pair("categories", &category_id.to_string());
            }
            query
                .append_pair("per_page", &self.per_page.to_string())
                .append_key_only("_embed")
                .append_pair("page", &page.to_string());
        }
        url
    }

    pub fn matches_category(&self, post: &Value) -> bool {
        extract_link(post).contains(&self.category_segment)
    }

    /// Never fails: a page that cannot be fetched or parsed yields no articles.
    pub async fn scrape_page(&self, page: u32) -> Vec<Article> {
        let logger = self.logger.clone().with_prefix(format!("[page {}]", page));
        let url = self.page_url(page);

        match self.try_scrape_page(&url, &logger).await {
            Ok(articles) => articles,
            Err(e) => {
                logger.error(&format!("❌ Failed to scrape {}: {}", url, e));
                Vec::new()
            }
        }
    }

    async fn try_scrape_page(&self, url: &Url, logger: &Logger) -> Result<Vec<Article>> {
        logger.info(&format!("🔎 Fetching news from {}", url));
        let body = fetch_with_timeout(self.fetcher.as_ref(), url.as_str(), self.timeout).await?;

        if body.trim().is_empty() {
            logger.warn("⚠️ Empty response from the API");
            return Ok(Vec::new());
        }

        let posts = match serde_json::from_str::<Value>(&body)? {
            Value::Array(posts) if !posts.is_empty() => posts,
            _ => {
                logger.warn("⚠️ No posts found on this page");
                return Ok(Vec::new());
            }
        };

        let total = posts.len();
        let selected: Vec<Value> = posts
            .into_iter()
            .filter(|post| self.matches_category(post))
            .collect();
        logger.debug(&format!(
            "{} of {} posts match {}",
            selected.len(),
            total,
            self.category_segment
        ));

        let results: Vec<_> = stream::iter(selected)
            .map(|post| {
                let content = self.content.clone();
                let logger = logger.clone();
                tokio::spawn(async move { process_post(post, &content, &logger).await })
            })
            .buffered(self.post_concurrency)
            .collect()
            .await;

        let mut articles = Vec::with_capacity(results.len());
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(article) => articles.push(article),
                Err(e) => logger.error(&format!("❌ Post {} aborted: {}", index + 1, e)),
            }
        }

        logger.info(&format!("📰 {} articles extracted", articles.len()));
        Ok(articles)
    }
}

async fn process_post(post: Value, content: &ContentFetcher, logger: &Logger) -> Article {
    let fields = PostFields::extract(&post);
    let publication_date = extract_raw_date(&post).and_then(|raw| parse_publication_date(&raw));

    let body = if fields.url.is_empty() {
        None
    } else {
        content.fetch_content(&fields.url).await
    };

    logger.debug(&format!(
        "Title: {} | Subtitle: {} | Author: {} | Date: {} | URL: {} | Content: {} chars",
        fields.title,
        fields.subtitle,
        fields.author,
        publication_date
            .map(|date| date.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        fields.url,
        body.as_ref().map_or(0, |text| text.chars().count()),
    ));

    fields.into_article(publication_date, body)
}
