use std::sync::Arc;

use futures::stream::{self, StreamExt};
use im_core::{Article, Result};

use crate::config::ScrapeConfig;
use crate::fetch::Fetcher;
use crate::logging::Logger;

pub mod content;
pub mod date;
pub mod page;
pub mod post;

pub use content::ContentFetcher;
pub use date::parse_publication_date;
pub use page::PageScraper;
pub use post::PostFields;

/// Walks pages `1..=max_pages` and concatenates their articles in page order.
#[derive(Clone)]
pub struct ScrapeOrchestrator {
    pages: PageScraper,
    max_pages: u32,
    page_concurrency: usize,
    logger: Logger,
}

impl ScrapeOrchestrator {
    pub fn new(config: &ScrapeConfig, fetcher: Arc<dyn Fetcher>, logger: Logger) -> Result<Self> {
        config.validate()?;
        let pages = PageScraper::new(config, fetcher, logger.clone())?;
        Ok(Self::from_parts(
            pages,
            config.max_pages,
            config.page_concurrency,
            logger,
        ))
    }

    pub fn from_parts(pages: PageScraper, max_pages: u32, page_concurrency: usize, logger: Logger) -> Self {
        Self {
            pages,
            max_pages,
            page_concurrency: page_concurrency.max(1),
            logger,
        }
    }

    pub async fn run(&self) -> Vec<Article> {
        self.logger.info(&format!("🦗 Scraping {} pages", self.max_pages));

        let batches: Vec<Vec<Article>> = stream::iter(1..=self.max_pages)
            .map(|page| self.pages.scrape_page(page))
            .buffered(self.page_concurrency)
            .collect()
            .await;

        let articles: Vec<Article> = batches.into_iter().flatten().collect();
        self.logger.info(&format!("💾 Total articles found: {}", articles.len()));
        articles
    }
}
