use std::sync::Arc;

use im_core::{Article, ArticleStore, Result, StoredArticle};

use crate::config::ScrapeConfig;
use crate::fetch::HttpFetcher;
use crate::logging::Logger;
use crate::scrapers::ScrapeOrchestrator;

/// Entry point for callers: runs scrapes and reads or writes the article store.
pub struct NewsManager {
    orchestrator: ScrapeOrchestrator,
    storage: Arc<dyn ArticleStore>,
    logger: Logger,
}

impl NewsManager {
    pub fn new(orchestrator: ScrapeOrchestrator, storage: Arc<dyn ArticleStore>, logger: Logger) -> Self {
        Self {
            orchestrator,
            storage,
            logger,
        }
    }

    /// Wires the HTTP fetcher and the default `tracing` logger from `config`.
    pub fn from_config(config: &ScrapeConfig, storage: Arc<dyn ArticleStore>) -> Result<Self> {
        let logger = Logger::new();
        let fetcher = Arc::new(HttpFetcher::new(config)?);
        let orchestrator = ScrapeOrchestrator::new(config, fetcher, logger.clone())?;
        Ok(Self::new(orchestrator, storage, logger))
    }

    /// One full run; nothing is persisted.
    pub async fn scrape_news(&self) -> Vec<Article> {
        self.orchestrator.run().await
    }

    pub async fn save_articles(&self, articles: &[Article]) -> Result<Vec<StoredArticle>> {
        let stored = self.storage.save_all(articles).await?;
        self.logger.info(&format!("💾 Stored {} articles", stored.len()));
        Ok(stored)
    }

    pub async fn scrape_and_save(&self) -> Result<Vec<StoredArticle>> {
        let articles = self.scrape_news().await;
        self.save_articles(&articles).await
    }

    pub async fn list_stored_articles(&self) -> Result<Vec<StoredArticle>> {
        self.storage.find_all().await
    }
}
