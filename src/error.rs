//! Error types for the scrape pipeline

use thiserror::Error;

/// Failures from the semantic-extraction service.
///
/// Timeouts get their own variant: the crawl ends the run on one and keeps
/// whatever was already collected.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extraction request timed out")]
    Timeout,

    #[error("extraction service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed extraction response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("extraction request failed: {0}")]
    Http(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ExtractError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Failures from the browser-automation layer.
///
/// A missing element and a timed-out operation take different paths through
/// the crawl, so they stay distinct variants rather than one broad bucket.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("browser operation timed out")]
    Timeout,

    #[error("no element matches {0}")]
    ElementMissing(String),

    #[error("browser session error: {0}")]
    Session(String),
}
