// Public modules
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

// Re-exports for convenience
pub use config::{PlannerConfig, PricingFailurePolicy};
pub use error::PlanError;
pub use models::{
    DeliveryOption, Location, OrderRequest, PharmacyOffer, PharmacyStock, Quote, SelectionResult,
    SkuRequest,
};
pub use pipeline::DeliveryPlanner;
