// Partial-availability pre-filter

use crate::models::{PharmacyStock, SkuRequest, StockProduct};

/// Keeps only pharmacies that cannot fully satisfy at least one request
/// line from their own stock or a qualifying substitute.
///
/// Pharmacies with everything in stock are handled by the
/// full-availability flow and are of no interest to the partial planner.
pub fn retain_with_missing_lines(
    pharmacies: Vec<PharmacyStock>,
    requests: &[SkuRequest],
) -> Vec<PharmacyStock> {
    pharmacies
        .into_iter()
        .filter(|pharmacy| has_missing_line(pharmacy, requests))
        .collect()
}

fn has_missing_line(pharmacy: &PharmacyStock, requests: &[SkuRequest]) -> bool {
    requests
        .iter()
        .any(|request| !line_is_coverable(&pharmacy.products, request))
}

/// A line is coverable when the product is stocked in the desired count
/// or any analog of it is.
fn line_is_coverable(products: &[StockProduct], request: &SkuRequest) -> bool {
    products
        .iter()
        .find(|product| product.sku == request.sku)
        .map(|product| {
            product.covers(request.count_desired)
                || product
                    .cheapest_sufficient_analog(request.count_desired)
                    .is_some()
        })
        .unwrap_or(false)
}
