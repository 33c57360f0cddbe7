// Models module - exports all model types

mod location;
mod pharmacy;
mod product;
mod quote;
mod request;

// Re-export model types
pub use self::location::Location;
pub use self::pharmacy::{PharmacyOffer, PharmacySource, PharmacyStock, Replacement};
pub use self::product::{LineItem, LineSource, StockProduct};
pub use self::quote::{DeliveryOption, Quote, SelectionResult};
pub use self::request::{OrderRequest, SkuRequest};

// Common type aliases for improved code readability
pub type Price = f64;
pub type Eta = f64;
