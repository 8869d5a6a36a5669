//! Chromium-backed implementation of the browser driver
//!
//! Owns the browser process, its CDP event handler task, and a single page
//! for the lifetime of one scrape session. Callers must run `close` on every
//! exit path or the OS-level browser process leaks.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::BrowserError;
use crate::traits::BrowserDriver;

pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch a Chromium session with a single blank page.
    pub async fn launch(headless: bool) -> Result<Self, BrowserError> {
        let mut builder = BrowserConfig::builder();
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::Session)?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(session_error)?;

        // The handler drives all CDP message dispatch; it has to be polled
        // for as long as the browser lives.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(session_error)?;

        debug!("Chromium session started (headless: {headless})");

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }
}

#[async_trait]
impl BrowserDriver for ChromiumDriver {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.page.goto(url).await.map_err(session_error)?;
        Ok(())
    }

    async fn html(&self) -> Result<String, BrowserError> {
        self.page.content().await.map_err(session_error)
    }

    async fn click_if_present(&self, selector: &str) -> Result<bool, BrowserError> {
        match self.page.find_element(selector).await {
            Ok(element) => {
                element.click().await.map_err(session_error)?;
                Ok(true)
            }
            Err(CdpError::Timeout) => Err(BrowserError::Timeout),
            Err(_) => Ok(false),
        }
    }

    async fn click_link(&self, href: &str) -> Result<(), BrowserError> {
        let selector = format!("a[href='{href}']");
        let element = match self.page.find_element(selector.as_str()).await {
            Ok(element) => element,
            Err(CdpError::Timeout) => return Err(BrowserError::Timeout),
            Err(_) => return Err(BrowserError::ElementMissing(selector)),
        };

        element.click().await.map_err(session_error)?;
        Ok(())
    }

    async fn settle(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    async fn close(&mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Browser process exit: {e}");
        }
        self.handler_task.abort();
    }
}

fn session_error(err: CdpError) -> BrowserError {
    match err {
        CdpError::Timeout => BrowserError::Timeout,
        other => BrowserError::Session(other.to_string()),
    }
}
