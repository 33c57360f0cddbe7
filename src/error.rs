// Error taxonomy for the delivery planner

use thiserror::Error;

use crate::services::{PricingError, SearchError};

/// Errors surfaced by a full planning run.
///
/// A pipeline that completes without a usable quote is not an error; it
/// reports an empty [`SelectionResult`](crate::models::SelectionResult).
#[derive(Debug, Error)]
pub enum PlanError {
    /// The inbound order was malformed; the request was not processed
    #[error("invalid request field '{field}': {message}")]
    InvalidRequest { field: &'static str, message: String },

    /// The inventory search failed or returned an unusable payload
    #[error(transparent)]
    Search(#[from] SearchError),

    /// A per-pharmacy pricing failure escalated under the abort policy
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl PlanError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field,
            message: message.into(),
        }
    }

    /// Distinguishes transport-level failures, which a caller may retry,
    /// from permanent input or contract errors
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidRequest { .. } => false,
            Self::Search(err) => err.is_retryable(),
            Self::Pricing(err) => err.is_retryable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_is_not_retryable() {
        let err = PlanError::invalid("city", "must not be empty");

        assert!(!err.is_retryable());
        assert!(err.to_string().contains("city"));
    }

    #[test]
    fn test_search_timeout_is_retryable() {
        let err = PlanError::from(SearchError::Timeout {
            url: "http://search.local".to_string(),
            timeout_secs: 30,
        });

        assert!(err.is_retryable());
    }

    #[test]
    fn test_pricing_rejection_is_not_retryable() {
        let err = PlanError::from(PricingError::Rejected {
            status: "error".to_string(),
        });

        assert!(!err.is_retryable());
    }
}
