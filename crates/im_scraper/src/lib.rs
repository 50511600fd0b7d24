pub mod cli;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod manager;
pub mod scrapers;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::ScrapeConfig;
pub use fetch::{Fetcher, HttpFetcher};
pub use logging::{init_logging, Logger};
pub use manager::NewsManager;
pub use scrapers::{ContentFetcher, PageScraper, ScrapeOrchestrator};

pub use cli::{handle_command, ConfigArgs, ScraperCommands};

pub mod prelude {
    pub use super::scrapers::ScrapeOrchestrator;
    pub use super::manager::NewsManager;
    pub use im_core::{Article, Error, Result, StoredArticle};
}
