use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod browser;
mod crawl;
mod error;
mod export;
mod extraction;
mod grocery_scraper;
mod models;
mod traits;

use grocery_scraper::GroceryScraper;
use traits::ScrapeConfig;

/// Scrape product name/price rows from a grocery site's paginated search
/// results and save them to CSV.
#[derive(Parser, Debug)]
#[command(name = "grocery-scraper", version, about)]
struct Cli {
    /// Search results URL to start from
    url: String,

    /// Where to write the CSV output
    #[arg(short, long, default_value = "products.csv")]
    output: PathBuf,

    /// Run the browser without a visible window
    #[arg(long)]
    headless: bool,

    /// Maximum number of result pages to visit
    #[arg(long, default_value_t = 3)]
    max_pages: u32,

    /// Consecutive navigation failures tolerated before giving up
    #[arg(long, default_value_t = 3)]
    max_retries: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = ScrapeConfig::new(cli.url);
    config.headless = cli.headless;
    config.max_pages = cli.max_pages;
    config.max_unstable_attempts = cli.max_retries;

    let scraper = GroceryScraper::new(config)?;
    let records = scraper.scrape().await?;

    if records.is_empty() {
        anyhow::bail!(
            "no products were extracted; {} was not written",
            cli.output.display()
        );
    }

    export::write_csv(&records, &cli.output)?;
    println!("Data successfully saved to {}", cli.output.display());

    Ok(())
}
