use anyhow::Result;
use tracing::info;

use crate::browser::ChromiumDriver;
use crate::crawl;
use crate::extraction::AgentqlClient;
use crate::models::Product;
use crate::traits::ScrapeConfig;

/// Wires the live browser and the extraction service into one scrape run.
pub struct GroceryScraper {
    extractor: AgentqlClient,
    config: ScrapeConfig,
}

impl GroceryScraper {
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let extractor = AgentqlClient::from_env()?;

        Ok(Self { extractor, config })
    }

    /// Run one crawl session against the configured start URL. The browser
    /// session is released whether or not the crawl completed normally.
    pub async fn scrape(&self) -> Result<Vec<Product>> {
        info!("Scraping product listings from {}", self.config.start_url);

        let driver = ChromiumDriver::launch(self.config.headless).await?;
        let records = crawl::run_session(driver, &self.extractor, &self.config).await?;

        info!("Collected {} product rows", records.len());
        Ok(records)
    }
}
