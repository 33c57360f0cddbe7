// Order request models with boundary validation

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::Location;

/// One requested line: a SKU and how many units the customer wants.
///
/// The position of a line in the order defines its priority: earlier
/// entries are matched first and constrain which pharmacies survive to
/// later matching rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuRequest {
    pub sku: String,

    pub count_desired: u32,
}

impl SkuRequest {
    /// Creates a new request line
    pub fn new<S: Into<String>>(sku: S, count_desired: u32) -> Self {
        Self {
            sku: sku.into(),
            count_desired,
        }
    }
}

/// A full delivery order: city, prioritized SKU list and drop-off address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub city: String,

    /// Request lines in priority order (first entry resolves first)
    pub skus: Vec<SkuRequest>,

    /// Customer drop-off coordinates
    pub address: Location,
}

impl OrderRequest {
    /// Creates a new order request
    pub fn new<S: Into<String>>(city: S, skus: Vec<SkuRequest>, address: Location) -> Self {
        Self {
            city: city.into(),
            skus,
            address,
        }
    }

    /// Rejects malformed orders before any upstream call is made
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.city.trim().is_empty() {
            return Err(PlanError::invalid("city", "must not be empty"));
        }
        if self.skus.is_empty() {
            return Err(PlanError::invalid("skus", "at least one line is required"));
        }

        let mut seen = HashSet::new();
        for line in &self.skus {
            if line.sku.is_empty() {
                return Err(PlanError::invalid("skus", "sku must not be empty"));
            }
            if line.count_desired == 0 {
                return Err(PlanError::invalid(
                    "skus",
                    format!("count_desired for '{}' must be at least 1", line.sku),
                ));
            }
            if !seen.insert(line.sku.as_str()) {
                return Err(PlanError::invalid(
                    "skus",
                    format!("duplicate sku '{}'", line.sku),
                ));
            }
        }

        if !self.address.lat.is_finite() || !self.address.lon.is_finite() {
            return Err(PlanError::invalid("address", "coordinates must be finite"));
        }

        Ok(())
    }
}
