// Location model representing geographic coordinates

use serde::{Deserialize, Serialize};

/// Represents a point as a latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,

    /// Longitude; serialized as `lng` on the wire
    #[serde(rename = "lng")]
    pub lon: f64,
}

impl Location {
    /// Creates a new location with the given coordinates
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Straight-line distance on the raw coordinate plane.
    ///
    /// Degrees are treated as planar units, not arc lengths. Shortlist
    /// membership depends on this ordering, so the metric stays planar.
    pub fn planar_distance_to(&self, other: &Location) -> f64 {
        ((self.lat - other.lat).powi(2) + (self.lon - other.lon).powi(2)).sqrt()
    }
}
