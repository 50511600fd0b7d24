use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use im_core::Error;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeParams {
    /// Persist the batch before returning it
    #[serde(default)]
    pub save: bool,
}

/// Runs one scrape. Recoverable page/post failures still answer 200 with a smaller batch.
pub async fn scrape_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScrapeParams>,
) -> Response {
    info!("🦗 Starting news scrape (save = {})", params.save);

    if params.save {
        match state.manager.scrape_and_save().await {
            Ok(stored) => {
                info!("✅ Scrape finished: {} articles saved", stored.len());
                Json(stored).into_response()
            }
            Err(e) => error_response(e),
        }
    } else {
        let articles = state.manager.scrape_news().await;
        info!("✅ Scrape finished: {} articles", articles.len());
        Json(articles).into_response()
    }
}

pub async fn list_articles(State(state): State<Arc<AppState>>) -> Response {
    match state.manager.list_stored_articles().await {
        Ok(articles) => Json(articles).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: Error) -> Response {
    error!("❌ Request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_app;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use im_core::{Article, ArticleStore, Result, StoredArticle};
    use im_scraper::{Fetcher, Logger, NewsManager, ScrapeConfig, ScrapeOrchestrator};
    use im_storage::MemoryStorage;
    use serde_json::Value;
    use tower::ServiceExt;

    const BASE: &str = "https://api.test/wp-json/wp/v2/posts";

    struct StubFetcher;

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            if url.starts_with(BASE) && url.ends_with("page=1") {
                Ok(r#"[
                    {"link": "https://x/mercados/abc", "title": {"rendered": "Foo"}},
                    {"link": "https://x/politica/def", "title": {"rendered": "Bar"}}
                ]"#
                .to_string())
            } else if url.starts_with(BASE) {
                Ok("[]".to_string())
            } else {
                Err(Error::Scraping(format!("unreachable: {}", url)))
            }
        }
    }

    struct BrokenStorage;

    #[async_trait]
    impl ArticleStore for BrokenStorage {
        async fn save_all(&self, _articles: &[Article]) -> Result<Vec<StoredArticle>> {
            Err(Error::Storage("database is locked".to_string()))
        }

        async fn find_all(&self) -> Result<Vec<StoredArticle>> {
            Err(Error::Storage("database is locked".to_string()))
        }
    }

    fn app(storage: Arc<dyn ArticleStore>) -> axum::Router {
        let config = ScrapeConfig {
            api_base_url: BASE.to_string(),
            ..ScrapeConfig::default()
        };
        let orchestrator =
            ScrapeOrchestrator::new(&config, Arc::new(StubFetcher), Logger::new()).unwrap();
        let manager = NewsManager::new(orchestrator, storage, Logger::new());
        create_app(AppState {
            manager: Arc::new(manager),
        })
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_scrape_returns_batch_without_saving() {
        let storage = Arc::new(MemoryStorage::new());

        let (status, body) = get(app(storage.clone()), "/api/news/scrape").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["title"], "Foo");
        assert_eq!(body[0]["author"], "unknown");
        assert!(body[0]["content"].is_null());
        assert!(body[0].get("id").is_none());

        let (_, listed) = get(app(storage), "/api/news").await;
        assert!(listed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scrape_with_save_then_list() {
        let storage = Arc::new(MemoryStorage::new());

        let (status, body) = get(app(storage.clone()), "/api/news/scrape?save=true").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], 1);

        let (status, listed) = get(app(storage), "/api/news").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["url"], "https://x/mercados/abc");
    }

    #[tokio::test]
    async fn test_storage_errors_are_500() {
        let (status, body) = get(app(Arc::new(BrokenStorage)), "/api/news").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("database is locked"));

        let (status, _) = get(app(Arc::new(BrokenStorage)), "/api/news/scrape?save=true").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
