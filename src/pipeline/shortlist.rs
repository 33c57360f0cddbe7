// Shortlist selection: nearest pharmacies and cheapest baskets

use std::cmp::Ordering;

use crate::models::{Location, PharmacyOffer};

/// The geographically closest offers by planar distance from the
/// customer address.
///
/// Offers without coordinates are excluded from this list only; they can
/// still reach the cheapest shortlist.
pub fn closest_shortlist(
    offers: &[PharmacyOffer],
    address: Location,
    limit: usize,
) -> Vec<PharmacyOffer> {
    let mut with_distance: Vec<(f64, &PharmacyOffer)> = offers
        .iter()
        .filter_map(|offer| {
            offer
                .location()
                .map(|location| (address.planar_distance_to(&location), offer))
        })
        .collect();

    // Stable sort keeps input order on equal distances
    with_distance.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    with_distance
        .into_iter()
        .take(limit)
        .map(|(_, offer)| offer.clone())
        .collect()
}

/// The cheapest offers by basket total; non-finite totals sort last.
pub fn cheapest_shortlist(offers: &[PharmacyOffer], limit: usize) -> Vec<PharmacyOffer> {
    let mut sorted: Vec<&PharmacyOffer> = offers.iter().collect();

    sorted.sort_by(|a, b| {
        sort_total(a.total_sum)
            .partial_cmp(&sort_total(b.total_sum))
            .unwrap_or(Ordering::Equal)
    });

    sorted.into_iter().take(limit).cloned().collect()
}

fn sort_total(total: f64) -> f64 {
    if total.is_finite() {
        total
    } else {
        f64::INFINITY
    }
}
