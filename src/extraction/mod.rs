//! HTTP client for the AgentQL field-query service
//!
//! The service matches fields by meaning rather than fixed selectors, so the
//! same two queries work across grocery sites with different markup.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ExtractError;
use crate::models::{PaginationPayload, ProductsPayload};
use crate::traits::FieldExtractor;

const DEFAULT_API_URL: &str = "https://api.agentql.com/v1/query-data";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Field query for the product rows on the current page.
const PRODUCTS_QUERY: &str = r#"
{
    products[] {
        name
        price_per_count
        price
        website_name
    }
}"#;

/// Field query for the pagination control.
const NEXT_PAGE_QUERY: &str = r#"
{
    page_selector {
        next_page_link
    }
}"#;

/// Client for the hosted field-query endpoint.
pub struct AgentqlClient {
    client: Client,
    api_key: String,
    api_url: String,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    html: &'a str,
}

#[derive(serde::Deserialize)]
struct QueryResponse<T> {
    data: T,
}

impl AgentqlClient {
    /// Build a client from `AGENTQL_API_KEY`, with an optional endpoint
    /// override in `AGENTQL_API_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("AGENTQL_API_KEY")
            .map_err(|_| anyhow::anyhow!("AGENTQL_API_KEY environment variable must be set"))?;
        let api_url =
            std::env::var("AGENTQL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(api_key, api_url)
    }

    pub fn new(api_key: String, api_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;

        Ok(Self {
            client,
            api_key,
            api_url,
        })
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, html: &str) -> Result<T, ExtractError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("X-API-Key", &self.api_key)
            .json(&QueryRequest { query, html })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: QueryResponse<T> = serde_json::from_str(&body)?;
        Ok(parsed.data)
    }
}

#[async_trait]
impl FieldExtractor for AgentqlClient {
    async fn products(&self, html: &str) -> Result<ProductsPayload, ExtractError> {
        debug!("Querying product fields against {} bytes of HTML", html.len());
        self.query(PRODUCTS_QUERY, html).await
    }

    async fn next_page_link(&self, html: &str) -> Result<PaginationPayload, ExtractError> {
        debug!("Querying pagination fields against {} bytes of HTML", html.len());
        self.query(NEXT_PAGE_QUERY, html).await
    }
}
