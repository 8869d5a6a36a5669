//! Data models for scraped products and extraction service payloads

use serde::{Deserialize, Deserializer, Serialize};

/// A single product row extracted from a results page.
///
/// Field order matters: the CSV header is derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub price_per_count: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(default)]
    pub website_name: String,
}

/// Payload returned for the product field query.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsPayload {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Payload returned for the pagination field query.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationPayload {
    #[serde(default)]
    pub page_selector: Option<PageSelector>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageSelector {
    #[serde(default)]
    pub next_page_link: Option<String>,
}

impl PaginationPayload {
    /// The next-page href, if the service found one.
    pub fn next_page_link(&self) -> Option<&str> {
        self.page_selector
            .as_ref()?
            .next_page_link
            .as_deref()
            .filter(|link| !link.is_empty())
    }
}

/// Prices arrive as either a string ("$5.99") or a bare number depending on
/// the source site; keep the textual form either way, unnormalized.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}
