// Orchestrates one full resolution from search results to a selection

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use log::{debug, warn};

use crate::config::{PlannerConfig, PricingFailurePolicy};
use crate::error::PlanError;
use crate::models::{Location, OrderRequest, PharmacyOffer, Quote, SelectionResult};
use crate::pipeline::{availability, best_option, fulfillment, priority_filter, shortlist};
use crate::services::{BasketItem, DeliveryPricing, InventorySearch, PricingRequest};

/// Runs the decision pipeline over the two collaborator services.
///
/// Each call to [`plan`](Self::plan) owns its whole working set; there is
/// no state shared between resolutions. The evaluation instant is
/// supplied by the caller and captured once, so every quote in one
/// resolution is judged against the same clock.
pub struct DeliveryPlanner<S, P> {
    search: S,
    pricing: P,
    config: PlannerConfig,
}

impl<S, P> DeliveryPlanner<S, P>
where
    S: InventorySearch,
    P: DeliveryPricing,
{
    /// Creates a planner with default configuration
    pub fn new(search: S, pricing: P) -> Self {
        Self::with_config(search, pricing, PlannerConfig::default())
    }

    /// Creates a planner with explicit configuration
    pub fn with_config(search: S, pricing: P, config: PlannerConfig) -> Self {
        Self {
            search,
            pricing,
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Resolves one order into the four best-option slots.
    ///
    /// An order that completes without any usable quote returns the
    /// empty [`SelectionResult`], not an error.
    pub async fn plan(
        &self,
        request: &OrderRequest,
        now: DateTime<Utc>,
    ) -> Result<SelectionResult, PlanError> {
        request.validate()?;

        let mut pharmacies = self.search.search(&request.city, &request.skus).await?;
        debug!("search returned {} pharmacies", pharmacies.len());

        if self.config.only_partial_baskets {
            pharmacies = availability::retain_with_missing_lines(pharmacies, &request.skus);
            debug!("{} pharmacies have a missing line", pharmacies.len());
        }

        let offers = priority_filter::filter_by_priority(pharmacies, &request.skus);
        let top = fulfillment::max_fulfillment_group(offers);
        if top.is_empty() {
            // Nothing matched any line; report the empty outcome.
            return Ok(SelectionResult::default());
        }

        let closest = shortlist::closest_shortlist(&top, request.address, self.config.closest_limit);
        let cheapest = shortlist::cheapest_shortlist(&top, self.config.cheapest_limit);

        let mut quotes = self.collect_quotes(closest, request.address).await?;
        quotes.extend(self.collect_quotes(cheapest, request.address).await?);
        debug!("collected {} quotes across both shortlists", quotes.len());

        Ok(best_option::select_best(&quotes, now, &self.config))
    }

    /// Prices one shortlist, fanning the returned delivery options into
    /// one quote per option.
    ///
    /// Pharmacies in a shortlist are priced concurrently; the calls are
    /// independent of each other. What a single failed call does depends
    /// on the configured [`PricingFailurePolicy`].
    async fn collect_quotes(
        &self,
        offers: Vec<PharmacyOffer>,
        address: Location,
    ) -> Result<Vec<Quote>, PlanError> {
        let priceable: Vec<(PharmacyOffer, PricingRequest)> = offers
            .into_iter()
            .filter_map(|offer| {
                build_pricing_request(&offer, address).map(|request| (offer, request))
            })
            .collect();

        let calls = priceable
            .iter()
            .map(|(_, request)| self.pricing.delivery_options(request));
        let responses = join_all(calls).await;

        let mut quotes = Vec::new();
        for ((offer, _), response) in priceable.into_iter().zip(responses) {
            match response {
                Ok(options) => {
                    for option in options {
                        quotes.push(Quote::new(offer.clone(), option));
                    }
                }
                Err(err) => match self.config.pricing_failure {
                    PricingFailurePolicy::Degrade => {
                        warn!(
                            "pricing failed for pharmacy {:?}: {}",
                            offer.source.code, err
                        );
                    }
                    PricingFailurePolicy::Abort => return Err(err.into()),
                },
            }
        }

        Ok(quotes)
    }
}

/// Builds the purchasable basket for one offer.
///
/// `None` when the pharmacy cannot be priced at all: no source code, or
/// no resolved lines to buy. Both are skips, not errors.
fn build_pricing_request(offer: &PharmacyOffer, address: Location) -> Option<PricingRequest> {
    let source_code = offer.source.code.clone()?;

    let items: Vec<BasketItem> = offer
        .lines
        .iter()
        .map(|line| BasketItem {
            sku: line.sku.clone(),
            quantity: line.quantity_desired,
        })
        .collect();

    if items.is_empty() {
        return None;
    }

    Some(PricingRequest {
        items,
        dst: address,
        source_code,
    })
}
