use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use im_core::{Error, Result};

use crate::fetch::Fetcher;

#[derive(Debug, Clone)]
enum Reply {
    Body(String, Duration),
    Fail,
    Panic,
}

/// Canned responses keyed by URL; unknown URLs fail like an unreachable host.
#[derive(Debug, Default)]
pub struct MockFetcher {
    replies: HashMap<String, Reply>,
    requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_delayed_body(url, body, Duration::ZERO)
    }

    pub fn with_delayed_body(
        mut self,
        url: impl Into<String>,
        body: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.replies.insert(url.into(), Reply::Body(body.into(), delay));
        self
    }

    pub fn with_failure(mut self, url: impl Into<String>) -> Self {
        self.replies.insert(url.into(), Reply::Fail);
        self
    }

    /// The fetch itself panics, as a bug inside a post's task would.
    pub fn with_panic(mut self, url: impl Into<String>) -> Self {
        self.replies.insert(url.into(), Reply::Panic);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.replies.get(url).cloned() {
            Some(Reply::Body(body, delay)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(body)
            }
            Some(Reply::Panic) => panic!("fetcher blew up on {}", url),
            Some(Reply::Fail) | None => Err(Error::Scraping(format!("connection refused: {}", url))),
        }
    }
}
