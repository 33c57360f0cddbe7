//! External collaborators of the decision pipeline.
//!
//! Two upstream services feed the planner: the inventory search (which
//! pharmacies stock which SKUs, including substitutes) and the delivery
//! pricing service (price and ETA options for one basket at one
//! pharmacy). Both are modeled as async traits with reqwest-backed
//! production implementations; tests and the demo binary plug in
//! in-memory implementations instead.

use std::time::Duration;

mod inventory;
mod pricing;

pub use self::inventory::{HttpInventorySearch, InventorySearch, SearchError, SearchResponse};
pub use self::pricing::{
    BasketItem, DeliveryPricing, HttpDeliveryPricing, PricingError, PricingRequest,
    PricingResponse, PricingResult,
};

/// Default user agent for upstream requests.
pub const DEFAULT_USER_AGENT: &str = "pharmacy-delivery/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings shared by both HTTP collaborators.
#[derive(Debug, Clone)]
pub struct HttpServiceConfig {
    /// Full endpoint URL of the upstream service.
    pub endpoint: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpServiceConfig {
    /// Create a new configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build a reqwest client honouring these settings.
    fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
    }
}
