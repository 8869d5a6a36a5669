//! The paginated extraction loop
//!
//! One browser session walks a site's search results page by page, asking the
//! extraction service for product rows and the next-page href on each page.
//! Every expected failure is converted into a continue/stop decision here;
//! partial results always beat a crashed crawl.

use anyhow::Result;
use tracing::{info, warn};

use crate::error::BrowserError;
use crate::models::Product;
use crate::traits::{BrowserDriver, FieldExtractor, ScrapeConfig};

/// Mutable state for one crawl session.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Pages visited so far. A failed navigation does not roll this back, so
    /// a retried page counts again.
    pub page_number: u32,
    /// Extracted rows in page order, then in-page order. Append-only.
    pub records: Vec<Product>,
    /// Consecutive failed navigation clicks. Reset on the first success.
    pub unstable_attempts: u32,
}

/// Navigate to the configured start URL, run the crawl, and release the
/// browser session no matter how the crawl ended.
pub async fn run_session<D, E>(
    mut driver: D,
    extractor: &E,
    config: &ScrapeConfig,
) -> Result<Vec<Product>>
where
    D: BrowserDriver,
    E: FieldExtractor,
{
    let outcome = match driver.goto(&config.start_url).await {
        Ok(()) => Ok(collect_products(&driver, extractor, config).await),
        Err(e) => Err(anyhow::anyhow!("Failed to open {}: {e}", config.start_url)),
    };

    driver.close().await;
    outcome
}

/// Walk the paginated results starting from whatever page is currently
/// loaded, returning every product row extracted before the crawl stopped.
///
/// Stops on the page ceiling, pagination exhaustion, an extraction failure,
/// a missing next-page anchor, or `max_unstable_attempts` consecutive
/// navigation failures. A failed navigation leaves the current page loaded,
/// so the next iteration extracts it again; duplicate rows are kept.
pub async fn collect_products<D, E>(
    driver: &D,
    extractor: &E,
    config: &ScrapeConfig,
) -> Vec<Product>
where
    D: BrowserDriver,
    E: FieldExtractor,
{
    let mut state = SessionState::default();

    loop {
        state.page_number += 1;

        let html = match driver.html().await {
            Ok(html) => html,
            Err(e) => {
                warn!(
                    "Could not snapshot page {}: {e}. Stopping.",
                    state.page_number
                );
                break;
            }
        };

        match extractor.products(&html).await {
            Ok(payload) => {
                info!(
                    "Extracted {} products from page {}",
                    payload.products.len(),
                    state.page_number
                );
                state.records.extend(payload.products);
            }
            Err(e) => {
                warn!(
                    "Product query failed on page {}: {e}. Stopping.",
                    state.page_number
                );
                break;
            }
        }

        if state.page_number >= config.max_pages {
            info!("Reached page limit ({}). Stopping.", config.max_pages);
            break;
        }

        let pagination = match extractor.next_page_link(&html).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    "Next-page query failed on page {}: {e}. Stopping.",
                    state.page_number
                );
                break;
            }
        };

        dismiss_popup(driver, config).await;

        let Some(next_page) = pagination.next_page_link() else {
            info!(
                "No next page link on page {}. Pagination exhausted.",
                state.page_number
            );
            break;
        };

        match driver.click_link(next_page).await {
            Ok(()) => {
                driver.settle(config.nav_settle).await;
                state.unstable_attempts = 0;
            }
            Err(BrowserError::ElementMissing(selector)) => {
                warn!(
                    "No anchor matches {selector} on page {}. Stopping.",
                    state.page_number
                );
                break;
            }
            Err(e) => {
                state.unstable_attempts += 1;
                warn!(
                    "Navigation failed on page {} ({e}): unstable attempt {}/{}",
                    state.page_number, state.unstable_attempts, config.max_unstable_attempts
                );
                if state.unstable_attempts >= config.max_unstable_attempts {
                    warn!("Too many unstable attempts. Stopping.");
                    break;
                }
            }
        }
    }

    state.records
}

/// Best-effort dismissal of a popup overlay. Never affects the crawl.
async fn dismiss_popup<D: BrowserDriver>(driver: &D, config: &ScrapeConfig) {
    match driver.click_if_present(&config.popup_selector).await {
        Ok(true) => driver.settle(config.popup_settle).await,
        Ok(false) => {}
        Err(e) => warn!("Popup dismissal failed: {e}"),
    }
}
