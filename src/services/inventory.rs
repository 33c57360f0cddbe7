//! Inventory search collaborator.
//!
//! The search service takes a city and the ordered SKU list and returns
//! per-pharmacy stock, including substitute products for each requested
//! SKU. A response without the `result` array is a contract violation:
//! there is no partial inventory to work from, so the whole request
//! fails.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::HttpServiceConfig;
use crate::models::{PharmacyStock, SkuRequest};

/// Errors from the inventory search boundary.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Building the HTTP client failed.
    #[error("failed to build search client: {0}")]
    Client(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("search request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// The service answered with a non-success HTTP status.
    #[error("search service returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// The service could not be reached.
    #[error("could not reach search service at {url}: {message}")]
    Network { url: String, message: String },

    /// The response body did not match the agreed envelope.
    #[error("unexpected search response shape: {message}")]
    Contract { message: String },
}

impl SearchError {
    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Network { .. })
    }
}

/// Response envelope of the search service.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Pharmacies with stock for the requested SKUs; absent on a
    /// malformed response.
    pub result: Option<Vec<PharmacyStock>>,
}

/// Inventory lookup seam.
///
/// Production uses [`HttpInventorySearch`]; tests supply in-memory
/// implementations.
#[async_trait]
pub trait InventorySearch {
    /// Find pharmacies stocking the requested SKUs in the given city.
    async fn search(
        &self,
        city: &str,
        skus: &[SkuRequest],
    ) -> Result<Vec<PharmacyStock>, SearchError>;
}

/// reqwest-backed inventory search client.
#[derive(Debug, Clone)]
pub struct HttpInventorySearch {
    client: Client,
    config: HttpServiceConfig,
}

impl HttpInventorySearch {
    /// Create a client for the given search endpoint with default settings.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SearchError> {
        Self::with_config(HttpServiceConfig::new(endpoint))
    }

    /// Create a client with explicit connection settings.
    pub fn with_config(config: HttpServiceConfig) -> Result<Self, SearchError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    fn convert_error(&self, error: &reqwest::Error, url: &str) -> SearchError {
        if error.is_timeout() {
            return SearchError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return SearchError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            };
        }
        SearchError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl InventorySearch for HttpInventorySearch {
    async fn search(
        &self,
        city: &str,
        skus: &[SkuRequest],
    ) -> Result<Vec<PharmacyStock>, SearchError> {
        let url = self.config.endpoint.clone();

        let response = self
            .client
            .post(&url)
            .query(&[("city", city)])
            .json(&skus)
            .send()
            .await
            .map_err(|err| self.convert_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_error(&err, &url))?;

        let envelope: SearchResponse =
            response
                .json()
                .await
                .map_err(|err| SearchError::Contract {
                    message: err.to_string(),
                })?;

        envelope.result.ok_or_else(|| SearchError::Contract {
            message: "response is missing the result array".to_string(),
        })
    }
}
