//! Traits and configuration for the crawl's collaborators

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{BrowserError, ExtractError};
use crate::models::{PaginationPayload, ProductsPayload};

/// Tunables for one scrape run
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Search results URL the crawl starts from
    pub start_url: String,
    /// Run the browser without a visible window
    pub headless: bool,
    /// Hard ceiling on pages visited per run
    pub max_pages: u32,
    /// Consecutive failed navigation clicks tolerated before aborting
    pub max_unstable_attempts: u32,
    /// Close button for transient popup overlays
    pub popup_selector: String,
    /// Wait after dismissing a popup
    pub popup_settle: Duration,
    /// Wait after clicking through to the next page
    pub nav_settle: Duration,
}

impl ScrapeConfig {
    /// Default configuration for `start_url`: visible browser, three-page
    /// ceiling, three-strike instability budget.
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            headless: false,
            max_pages: 3,
            max_unstable_attempts: 3,
            popup_selector: "button[aria-label='Close']".to_string(),
            popup_settle: Duration::from_millis(3000),
            nav_settle: Duration::from_millis(2000),
        }
    }
}

/// Semantic field-query service that maps a declarative query against a DOM
/// snapshot into structured values, without fixed selectors.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    /// Extract the product rows visible in `html`.
    async fn products(&self, html: &str) -> Result<ProductsPayload, ExtractError>;

    /// Extract the pagination control's next-page href from `html`.
    async fn next_page_link(&self, html: &str) -> Result<PaginationPayload, ExtractError>;
}

/// One live browser page driving the crawl.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    /// Snapshot of the page's current DOM.
    async fn html(&self) -> Result<String, BrowserError>;

    /// Click the first element matching `selector` if one exists.
    /// Returns false when nothing matched.
    async fn click_if_present(&self, selector: &str) -> Result<bool, BrowserError>;

    /// Click the anchor whose href equals `href` exactly.
    async fn click_link(&self, href: &str) -> Result<(), BrowserError>;

    /// Let asynchronous page updates finish before the next operation.
    async fn settle(&self, delay: Duration);

    /// Release the underlying browser session.
    async fn close(&mut self);
}
