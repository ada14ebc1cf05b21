//! Product catalog API client.
//!
//! Thin JSON client over the external catalog service (dummyjson-style REST).
//! The catalog is the source of truth for products - no local sync, no
//! caching, no retries. Every page load fetches fresh data.

pub mod types;

use std::sync::Arc;

use esales_mart_core::ProductId;
use thiserror::Error;
use tracing::instrument;

use crate::config::CatalogConfig;
use types::{Product, ProductList};

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Product not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog service.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Catalog returned a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Client for the product catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
            }),
        }
    }

    /// Fetch the full product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/products", self.inner.base_url);
        let body = self.fetch(&url).await?;

        let list: ProductList = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog product list"
            );
            CatalogError::Parse(e)
        })?;

        Ok(list.products)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the catalog has no such product,
    /// or another error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = format!("{}/products/{id}", self.inner.base_url);
        let body = self.fetch(&url).await?;

        let product: Product = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog product"
            );
            CatalogError::Parse(e)
        })?;

        Ok(product)
    }

    /// Execute a GET request and return the response body.
    async fn fetch(&self, url: &str) -> Result<String, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Classified but never retried - callers surface a generic failure
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("https://dummyjson.com/products/9999".to_string());
        assert_eq!(
            err.to_string(),
            "Not found: https://dummyjson.com/products/9999"
        );

        let err = CatalogError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_status_error_display() {
        let err = CatalogError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Catalog returned HTTP 500: boom");
    }
}
