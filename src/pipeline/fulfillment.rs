// Fulfillment ranker: keep only the pharmacies with the largest resolved
// basket

use log::debug;

use crate::models::PharmacyOffer;

/// Returns the offers sharing the maximum resolved-line count, in input
/// order.
///
/// Offers with zero resolved lines never win: when nothing matched
/// anywhere the result is empty rather than a group of empty baskets.
pub fn max_fulfillment_group(offers: Vec<PharmacyOffer>) -> Vec<PharmacyOffer> {
    let max_resolved = offers
        .iter()
        .map(PharmacyOffer::resolved_count)
        .max()
        .unwrap_or(0);

    if max_resolved == 0 {
        return Vec::new();
    }

    let group: Vec<PharmacyOffer> = offers
        .into_iter()
        .filter(|offer| offer.resolved_count() == max_resolved)
        .collect();

    debug!(
        "kept {} pharmacies with {} resolved lines",
        group.len(),
        max_resolved
    );

    group
}
