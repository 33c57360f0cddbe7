// Planner configuration: thresholds and failure policies

use chrono::Duration;

/// What to do when the pricing service fails for a single pharmacy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PricingFailurePolicy {
    /// Record the failure; the pharmacy simply contributes no quotes
    #[default]
    Degrade,

    /// Fail the whole request on the first pricing error
    Abort,
}

/// Tunable thresholds and policies for one [`DeliveryPlanner`].
///
/// [`DeliveryPlanner`]: crate::pipeline::DeliveryPlanner
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Remaining open time at or below which a pharmacy counts as
    /// closing soon
    pub closing_soon_window: Duration,

    /// A closed pharmacy is admitted as an alternative only when its
    /// price or ETA is at most this fraction of the best open quote's
    pub closed_discount_margin: f64,

    /// Size of the nearest-pharmacy shortlist
    pub closest_limit: usize,

    /// Size of the cheapest-basket shortlist
    pub cheapest_limit: usize,

    pub pricing_failure: PricingFailurePolicy,

    /// Keep only pharmacies that cannot fully satisfy the order
    /// (the partial-availability mode)
    pub only_partial_baskets: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            closing_soon_window: Duration::hours(1),
            closed_discount_margin: 0.7,
            closest_limit: 2,
            cheapest_limit: 3,
            pricing_failure: PricingFailurePolicy::default(),
            only_partial_baskets: false,
        }
    }
}
