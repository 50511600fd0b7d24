use async_trait::async_trait;
use crate::types::{Article, StoredArticle};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Append a batch of articles, returning them with their assigned ids in the same order
    async fn save_all(&self, articles: &[Article]) -> Result<Vec<StoredArticle>>;

    /// Every stored article, oldest first
    async fn find_all(&self) -> Result<Vec<StoredArticle>>;
}
