use std::sync::Arc;
use std::time::Duration;

use im_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::fetch::{fetch_with_timeout, Fetcher};
use crate::logging::Logger;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

pub fn parse_selectors(selectors: &[String]) -> Result<Vec<Selector>> {
    selectors
        .iter()
        .map(|s| Selector::parse(s).map_err(|e| Error::Selector(format!("{}: {:?}", s, e))))
        .collect()
}

const SKIPPED_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

const BLOCK_TAGS: [&str; 24] = [
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "li", "p", "pre", "section",
    "tr",
];

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if SKIPPED_TAGS.contains(&name) {
                continue;
            }
            let block = BLOCK_TAGS.contains(&name);
            if block {
                out.push(' ');
            }
            push_text(child, out);
            if block {
                out.push(' ');
            }
        }
    }
}

/// Readable text of `element`: inline markup is joined without gaps, block elements are
/// separated by a space, and script/style bodies are left out.
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_text(element, &mut raw);
    collapse_whitespace(&raw)
}

/// Text of the first element matched by the highest-priority selector that matches anything.
/// A matched element without text yields `Some("")`; only a total miss is `None`.
pub fn extract_content(html: &str, selectors: &[Selector]) -> Option<String> {
    let document = Html::parse_document(html);
    selectors
        .iter()
        .find_map(|selector| document.select(selector).next())
        .map(element_text)
}

/// Downloads an article page and pulls out its body. Every failure is logged and becomes `None`.
#[derive(Clone)]
pub struct ContentFetcher {
    fetcher: Arc<dyn Fetcher>,
    selectors: Arc<Vec<Selector>>,
    timeout: Duration,
    logger: Logger,
}

impl ContentFetcher {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        selectors: &[String],
        timeout: Duration,
        logger: Logger,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            selectors: Arc::new(parse_selectors(selectors)?),
            timeout,
            logger,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn fetch_content(&self, url: &str) -> Option<String> {
        let html = match fetch_with_timeout(self.fetcher.as_ref(), url, self.timeout).await {
            Ok(html) => html,
            Err(e) => {
                self.logger.warn(&format!("⚠️ Failed to fetch content from {}: {}", url, e));
                return None;
            }
        };

        let content = extract_content(&html, &self.selectors);
        if content.is_none() {
            self.logger.warn(&format!("⚠️ No content selector matched {}", url));
        }
        content
    }
}
