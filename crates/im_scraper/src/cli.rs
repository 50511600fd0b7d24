use std::path::PathBuf;

use clap::{Args, Subcommand};
use im_core::Result;
use serde::Serialize;

use crate::config::ScrapeConfig;
use crate::manager::NewsManager;

/// Scrape settings that can be given on the command line or through the environment.
/// Anything set here wins over the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON file with scrape settings
    #[arg(long, env = "IM_CONFIG")]
    pub config: Option<PathBuf>,
    /// Number of API pages to walk
    #[arg(long, env = "IM_MAX_PAGES")]
    pub pages: Option<u32>,
    /// URL path segment a post link must contain (e.g. /mercados/)
    #[arg(long, env = "IM_CATEGORY_SEGMENT")]
    pub category_segment: Option<String>,
    /// Also filter the API query by category id
    #[arg(long, env = "IM_CATEGORY_ID")]
    pub category_id: Option<u64>,
    /// Per-request timeout in seconds
    #[arg(long, env = "IM_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
    /// Pages fetched at the same time
    #[arg(long, env = "IM_PAGE_CONCURRENCY")]
    pub page_concurrency: Option<usize>,
    /// Article pages fetched at the same time within one API page
    #[arg(long, env = "IM_POST_CONCURRENCY")]
    pub post_concurrency: Option<usize>,
}

impl ConfigArgs {
    pub fn resolve(&self) -> Result<ScrapeConfig> {
        let mut config = match &self.config {
            Some(path) => ScrapeConfig::from_file(path)?,
            None => ScrapeConfig::default(),
        };

        if let Some(pages) = self.pages {
            config.max_pages = pages;
        }
        if let Some(segment) = &self.category_segment {
            config.category_segment = segment.clone();
        }
        if self.category_id.is_some() {
            config.category_id = self.category_id;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = secs;
        }
        if let Some(limit) = self.page_concurrency {
            config.page_concurrency = limit;
        }
        if let Some(limit) = self.post_concurrency {
            config.post_concurrency = limit;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Run one scrape and print the articles as JSON
    Scrape {
        /// Persist the batch and print the stored records instead
        #[arg(long)]
        save: bool,
    },
    /// Print every stored article as JSON
    List,
}

pub async fn handle_command(command: ScraperCommands, manager: &NewsManager) -> Result<()> {
    match command {
        ScraperCommands::Scrape { save } => {
            if save {
                let stored = manager.scrape_and_save().await?;
                print_json(&stored)?;
            } else {
                let articles = manager.scrape_news().await;
                print_json(&articles)?;
            }
        }
        ScraperCommands::List => {
            let stored = manager.list_stored_articles().await?;
            print_json(&stored)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
