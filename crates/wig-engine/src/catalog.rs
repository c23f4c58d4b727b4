//! UPCitemdb catalog client
//!
//! Best-effort product metadata for a barcode. Fields the catalog does
//! not know come back empty.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const USER_AGENT: &str = "WIG/0.1.0";

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// What the external catalog knows about a barcode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub name: String,
    pub brand: String,
    pub image_url: String,
}

/// External barcode catalog.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn lookup(&self, barcode: &str) -> Result<CatalogProduct, CatalogError>;
}

/// UPCitemdb lookup response
#[derive(Debug, Clone, Deserialize)]
pub struct UpcLookupResponse {
    #[serde(default)]
    pub items: Vec<UpcItem>,
}

/// One `items[]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct UpcItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<UpcLookupResponse> for CatalogProduct {
    /// Takes the first item; no items means an empty product.
    fn from(response: UpcLookupResponse) -> Self {
        match response.items.into_iter().next() {
            Some(item) => CatalogProduct {
                name: item.title,
                brand: item.brand,
                image_url: item.images.into_iter().next().unwrap_or_default(),
            },
            None => CatalogProduct::default(),
        }
    }
}

/// UPCitemdb API client
pub struct UpcItemDbClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl UpcItemDbClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CatalogClient for UpcItemDbClient {
    async fn lookup(&self, barcode: &str) -> Result<CatalogProduct, CatalogError> {
        tracing::debug!(barcode = %barcode, url = %self.base_url, "Querying catalog");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("upc", barcode)])
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        let status = response.status();

        // UPCitemdb answers unknown codes with 404 / INVALID_UPC
        if status == 404 || status == 400 {
            return Ok(CatalogProduct::default());
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError(status.as_u16(), error_text));
        }

        let body: UpcLookupResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let product = CatalogProduct::from(body);

        tracing::info!(barcode = %barcode, name = %product.name, "Retrieved catalog product");

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_item_is_used() {
        let body: UpcLookupResponse = serde_json::from_str(
            r#"{
                "code": "OK",
                "total": 2,
                "items": [
                    {"ean": "0885909950805", "title": "Headlamp", "brand": "Petzl",
                     "images": ["https://img.example/a.jpg", "https://img.example/b.jpg"]},
                    {"title": "Other", "brand": "Other", "images": []}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            CatalogProduct::from(body),
            CatalogProduct {
                name: "Headlamp".to_string(),
                brand: "Petzl".to_string(),
                image_url: "https://img.example/a.jpg".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let body: UpcLookupResponse =
            serde_json::from_str(r#"{"items": [{"title": "Tarp"}]}"#).unwrap();
        let product = CatalogProduct::from(body);
        assert_eq!(product.name, "Tarp");
        assert!(product.brand.is_empty());
        assert!(product.image_url.is_empty());

        let body: UpcLookupResponse =
            serde_json::from_str(r#"{"code": "OK", "items": []}"#).unwrap();
        assert_eq!(CatalogProduct::from(body), CatalogProduct::default());
    }

    #[test]
    fn test_client_creation() {
        let client = UpcItemDbClient::new("http://localhost:1/lookup", Duration::from_secs(1));
        assert!(client.is_ok());
    }
}
