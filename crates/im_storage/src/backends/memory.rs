use async_trait::async_trait;
use im_core::{Article, ArticleStore, Result, StoredArticle};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
pub struct MemoryStore {
    articles: Vec<StoredArticle>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            next_id: 1,
        }
    }

    pub fn save_all(&mut self, articles: &[Article]) -> Vec<StoredArticle> {
        let mut stored = Vec::with_capacity(articles.len());
        for article in articles {
            let record = StoredArticle::new(self.next_id, article.clone());
            self.next_id += 1;
            self.articles.push(record.clone());
            stored.push(record);
        }
        stored
    }

    pub fn find_all(&self) -> Vec<StoredArticle> {
        self.articles.clone()
    }
}

/// Process-local store; contents are lost on exit.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(MemoryStore::new())),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStore for MemoryStorage {
    async fn save_all(&self, articles: &[Article]) -> Result<Vec<StoredArticle>> {
        let mut store = self.store.write().await;
        Ok(store.save_all(articles))
    }

    async fn find_all(&self) -> Result<Vec<StoredArticle>> {
        let store = self.store.read().await;
        Ok(store.find_all())
    }
}
