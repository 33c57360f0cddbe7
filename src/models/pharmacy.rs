// Pharmacy models: inventory search entries and resolved offers

use serde::{Deserialize, Serialize};

use crate::models::{LineItem, LineSource, Location, Price, StockProduct};

/// Identity and schedule of one pharmacy as reported by the search service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PharmacySource {
    /// Unique pharmacy code; entries without one cannot be priced
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub city: Option<String>,

    /// Street address for the customer-facing report
    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub lat: Option<f64>,

    #[serde(default)]
    pub lon: Option<f64>,

    /// Free-text schedule, or the around-the-clock sentinel
    #[serde(default)]
    pub opening_hours: String,

    /// Opening instant for the current day, RFC 3339 UTC
    #[serde(default)]
    pub opens_at: Option<String>,

    /// Closing instant for the current day, RFC 3339 UTC
    #[serde(default)]
    pub closes_at: Option<String>,
}

/// One inventory search result: a pharmacy and its stock for the
/// requested SKUs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacyStock {
    pub source: PharmacySource,

    #[serde(default)]
    pub products: Vec<StockProduct>,
}

/// Audit record of one substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub original_sku: String,
    pub replacement_sku: String,
}

/// A pharmacy annotated with the lines resolved for the current order.
///
/// Only successfully resolved lines are present; an unresolved request
/// line is absent from `lines` and never contributes to `total_sum`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacyOffer {
    pub source: PharmacySource,

    pub lines: Vec<LineItem>,

    /// Sum of resolved line totals
    pub total_sum: Price,

    /// Number of lines resolved through a substitute
    pub replacements_needed: u32,

    /// Audit trail of original SKU to substitute SKU
    pub replaced_skus: Vec<Replacement>,
}

impl PharmacyOffer {
    /// Starts an offer with no resolved lines
    pub fn new(source: PharmacySource) -> Self {
        Self {
            source,
            lines: Vec::new(),
            total_sum: 0.0,
            replacements_needed: 0,
            replaced_skus: Vec::new(),
        }
    }

    /// Adds a resolved line, updating the basket total and the
    /// substitution audit fields
    pub fn push_line(&mut self, line: LineItem) {
        self.total_sum += line.line_total();
        if let LineSource::Substitute { ref original_sku } = line.source {
            self.replacements_needed += 1;
            self.replaced_skus.push(Replacement {
                original_sku: original_sku.clone(),
                replacement_sku: line.sku.clone(),
            });
        }
        self.lines.push(line);
    }

    /// Number of distinct request lines this pharmacy satisfies
    pub fn resolved_count(&self) -> usize {
        self.lines.len()
    }

    /// Coordinates of the pharmacy, when the source carries both
    pub fn location(&self) -> Option<Location> {
        match (self.source.lat, self.source.lon) {
            (Some(lat), Some(lon)) => Some(Location::new(lat, lon)),
            _ => None,
        }
    }
}
