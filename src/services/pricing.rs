//! Delivery pricing collaborator.
//!
//! For one basket at one pharmacy the pricing service returns zero or
//! more delivery options (courier tiers), each with a price and an ETA.
//! A non-success status means the basket was not accepted; whether that
//! aborts the whole request is the planner's policy, not decided here.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::HttpServiceConfig;
use crate::models::{DeliveryOption, Location};

/// One basket line sent to the pricing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    pub sku: String,
    pub quantity: u32,
}

/// Pricing request for a single pharmacy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingRequest {
    /// Purchasable lines (substitute SKUs already resolved).
    pub items: Vec<BasketItem>,
    /// Customer drop-off coordinates.
    pub dst: Location,
    /// Pharmacy code the basket is picked from.
    pub source_code: String,
}

/// Errors from the pricing boundary.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Building the HTTP client failed.
    #[error("failed to build pricing client: {0}")]
    Client(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("pricing request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// The service answered with a non-success HTTP status.
    #[error("pricing service returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// The service could not be reached.
    #[error("could not reach pricing service at {url}: {message}")]
    Network { url: String, message: String },

    /// The service answered but did not accept the basket.
    #[error("pricing service rejected the request with status '{status}'")]
    Rejected { status: String },

    /// The response body did not match the agreed envelope.
    #[error("unexpected pricing response shape: {message}")]
    Contract { message: String },
}

impl PricingError {
    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Network { .. })
    }
}

/// Response envelope of the pricing service.
#[derive(Debug, Deserialize)]
pub struct PricingResponse {
    pub status: String,

    pub result: Option<PricingResult>,
}

/// Payload of a successful pricing response.
#[derive(Debug, Deserialize)]
pub struct PricingResult {
    #[serde(default)]
    pub delivery: Vec<DeliveryOption>,
}

impl PricingResponse {
    /// Check if the response indicates success.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Extract the delivery options, rejecting unsuccessful or
    /// malformed envelopes.
    pub fn into_options(self) -> Result<Vec<DeliveryOption>, PricingError> {
        if !self.is_success() {
            return Err(PricingError::Rejected {
                status: self.status,
            });
        }
        self.result
            .map(|result| result.delivery)
            .ok_or_else(|| PricingError::Contract {
                message: "successful response is missing the result payload".to_string(),
            })
    }
}

/// Pricing seam.
///
/// Production uses [`HttpDeliveryPricing`]; tests supply in-memory
/// implementations.
#[async_trait]
pub trait DeliveryPricing {
    /// Price the delivery of one basket from one pharmacy.
    async fn delivery_options(
        &self,
        request: &PricingRequest,
    ) -> Result<Vec<DeliveryOption>, PricingError>;
}

/// reqwest-backed pricing client.
#[derive(Debug, Clone)]
pub struct HttpDeliveryPricing {
    client: Client,
    config: HttpServiceConfig,
}

impl HttpDeliveryPricing {
    /// Create a client for the given pricing endpoint with default settings.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, PricingError> {
        Self::with_config(HttpServiceConfig::new(endpoint))
    }

    /// Create a client with explicit connection settings.
    pub fn with_config(config: HttpServiceConfig) -> Result<Self, PricingError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    fn convert_error(&self, error: &reqwest::Error, url: &str) -> PricingError {
        if error.is_timeout() {
            return PricingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return PricingError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            };
        }
        PricingError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl DeliveryPricing for HttpDeliveryPricing {
    async fn delivery_options(
        &self,
        request: &PricingRequest,
    ) -> Result<Vec<DeliveryOption>, PricingError> {
        let url = self.config.endpoint.clone();

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| self.convert_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_error(&err, &url))?;

        let envelope: PricingResponse =
            response
                .json()
                .await
                .map_err(|err| PricingError::Contract {
                    message: err.to_string(),
                })?;

        envelope.into_options()
    }
}
