// Sequential priority filter: one matching round per requested SKU

use log::debug;

use crate::models::{LineItem, PharmacyOffer, PharmacyStock, SkuRequest, StockProduct};

/// Working entry for one pharmacy while the rounds are running.
///
/// The input position is kept so the final set can be reported in input
/// order regardless of how candidates moved between the active and
/// parked sets.
#[derive(Debug, Clone)]
struct Candidate {
    index: usize,
    offer: PharmacyOffer,
    products: Vec<StockProduct>,
}

impl Candidate {
    fn new(index: usize, stock: PharmacyStock) -> Self {
        Self {
            index,
            offer: PharmacyOffer::new(stock.source),
            products: stock.products,
        }
    }
}

/// Resolves the ordered request lines against every pharmacy.
///
/// Lines are processed in priority order, one round per line, over the
/// survivors of the previous round. A pharmacy advances to the next
/// round only if the current round resolved a line (the original
/// product, or its cheapest sufficient substitute). A round in which no
/// pharmacy matches does not terminate the filter: the previous
/// survivors carry on to the remaining rounds.
///
/// The returned set contains every pharmacy that resolved at least one
/// line, in input order, with cumulative substitution audit data; a
/// partial basket is a valid outcome ranked later by how many lines it
/// satisfies.
pub fn filter_by_priority(
    pharmacies: Vec<PharmacyStock>,
    requests: &[SkuRequest],
) -> Vec<PharmacyOffer> {
    let mut active: Vec<Candidate> = pharmacies
        .into_iter()
        .enumerate()
        .map(|(index, stock)| Candidate::new(index, stock))
        .collect();

    // Candidates that dropped out of the rounds but may still hold a
    // partial basket.
    let mut parked: Vec<Candidate> = Vec::new();

    for (round, request) in requests.iter().enumerate() {
        let mut matched: Vec<Candidate> = Vec::new();
        let mut missed: Vec<Candidate> = Vec::new();

        for mut candidate in active {
            match resolve_line(&candidate.products, request) {
                Some(line) => {
                    candidate.offer.push_line(line);
                    matched.push(candidate);
                }
                None => missed.push(candidate),
            }
        }

        debug!(
            "round {}/{} ('{}'): {} matched, {} missed",
            round + 1,
            requests.len(),
            request.sku,
            matched.len(),
            missed.len()
        );

        if matched.is_empty() {
            // Nobody carries this line; the previous survivors continue
            // with the remaining rounds.
            active = missed;
        } else {
            active = matched;
            parked.extend(missed);
        }
    }

    let mut result: Vec<Candidate> = active
        .into_iter()
        .chain(parked)
        .filter(|candidate| !candidate.offer.lines.is_empty())
        .collect();
    result.sort_by_key(|candidate| candidate.index);

    result.into_iter().map(|candidate| candidate.offer).collect()
}

/// Tries to resolve one request line against a pharmacy's stock.
///
/// The original product wins when its stock covers the desired count;
/// otherwise the cheapest analog with sufficient stock substitutes it.
/// `None` means the pharmacy cannot carry this line at all.
fn resolve_line(products: &[StockProduct], request: &SkuRequest) -> Option<LineItem> {
    let product = products.iter().find(|p| p.sku == request.sku)?;

    if product.covers(request.count_desired) {
        return Some(LineItem::original(product, request.count_desired));
    }

    product
        .cheapest_sufficient_analog(request.count_desired)
        .map(|analog| LineItem::substitute(analog, &product.sku, request.count_desired))
}
