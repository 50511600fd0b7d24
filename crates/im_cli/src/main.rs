use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use im_scraper::cli::{handle_command, ConfigArgs, ScraperCommands};
use im_scraper::{init_logging, NewsManager};
use im_web::AppState;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape market news articles and keep them in a store", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
    /// SQLite database file; without it articles are kept in memory
    #[arg(long, env = "IM_DATABASE")]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Scraper(ScraperCommands),
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "IM_ADDR", default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = cli.config.resolve()?;
    let storage = im_storage::create_storage(cli.db.as_deref()).await?;
    let manager = NewsManager::from_config(&config, storage)?;
    info!(
        "🦗 Scraper ready: {} pages of {} filtered by {}",
        config.max_pages, config.api_base_url, config.category_segment
    );

    match cli.command {
        Commands::Scraper(command) => handle_command(command, &manager).await?,
        Commands::Serve { addr } => {
            let state = AppState {
                manager: Arc::new(manager),
            };
            im_web::serve(state, addr).await?;
        }
    }

    Ok(())
}
