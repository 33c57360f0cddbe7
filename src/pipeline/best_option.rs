// Best-option resolver: cheapest and fastest open quotes, with closed
// pharmacies admitted only under the discount margin

use chrono::{DateTime, Utc};
use log::debug;

use crate::config::PlannerConfig;
use crate::models::{Quote, SelectionResult};
use crate::pipeline::opening_hours::{evaluate_status, PharmacyStatus};

/// Best-so-far state for one ranking axis.
///
/// Threaded through both passes instead of ambient mutable variables:
/// pass 1 fills `best_open` and possibly a closing-soon `alternative`,
/// pass 2 fills the discounted `best_closed` candidate.
#[derive(Debug, Default)]
struct AxisState<'a> {
    best_open: Option<&'a Quote>,
    alternative: Option<&'a Quote>,
    best_closed: Option<&'a Quote>,
}

/// Selects the cheapest and fastest open quotes from the merged
/// shortlist quotes.
///
/// Duplicated quotes (a pharmacy present on both shortlists) are
/// harmless: strict less-than comparisons mean the first instance wins
/// and the duplicate never displaces it. No open quote at all yields the
/// empty result; closed quotes alone can never win.
pub fn select_best(quotes: &[Quote], now: DateTime<Utc>, config: &PlannerConfig) -> SelectionResult {
    let statuses: Vec<PharmacyStatus> = quotes
        .iter()
        .map(|quote| evaluate_status(&quote.offer.source, now, config.closing_soon_window))
        .collect();

    let mut price_axis = AxisState::default();
    let mut eta_axis = AxisState::default();

    // Pass 1: open quotes only.
    for (quote, status) in quotes.iter().zip(&statuses) {
        if quote.offer.source.code.is_none() || !status.is_open() {
            continue;
        }

        if price_axis
            .best_open
            .map_or(true, |best| quote.total_price < best.total_price)
        {
            price_axis.best_open = Some(quote);
            price_axis.alternative = match status {
                PharmacyStatus::OpenClosingSoon => {
                    stable_alternative(quotes, &statuses, |q| q.total_price)
                }
                _ => None,
            };
        }

        if eta_axis
            .best_open
            .map_or(true, |best| quote.eta() < best.eta())
        {
            eta_axis.best_open = Some(quote);
            eta_axis.alternative = match status {
                PharmacyStatus::OpenClosingSoon => stable_alternative(quotes, &statuses, Quote::eta),
                _ => None,
            };
        }
    }

    // Pass 2: closed quotes against the open bests.
    for (quote, status) in quotes.iter().zip(&statuses) {
        if quote.offer.source.code.is_none() || *status != PharmacyStatus::Closed {
            continue;
        }

        if let Some(best_open) = price_axis.best_open {
            if quote.total_price <= best_open.total_price * config.closed_discount_margin
                && price_axis
                    .best_closed
                    .map_or(true, |best| quote.total_price < best.total_price)
            {
                debug!(
                    "closed pharmacy {:?} undercuts the open price {:.2} with {:.2}",
                    quote.offer.source.code, best_open.total_price, quote.total_price
                );
                price_axis.best_closed = Some(quote);
            }
        }

        if let Some(best_open) = eta_axis.best_open {
            if quote.eta() <= best_open.eta() * config.closed_discount_margin
                && eta_axis
                    .best_closed
                    .map_or(true, |best| quote.eta() < best.eta())
            {
                eta_axis.best_closed = Some(quote);
            }
        }
    }

    // A discounted closed pharmacy overrides whatever closing-soon
    // alternative pass 1 found.
    if price_axis.best_open.is_some() && price_axis.best_closed.is_some() {
        SelectionResult {
            cheapest_open: price_axis.best_open.cloned(),
            alternative_cheapest: price_axis.best_closed.cloned(),
            fastest_open: eta_axis.best_open.cloned(),
            alternative_fastest: eta_axis.best_closed.cloned(),
        }
    } else {
        SelectionResult {
            cheapest_open: price_axis.best_open.cloned(),
            alternative_cheapest: price_axis.alternative.cloned(),
            fastest_open: eta_axis.best_open.cloned(),
            alternative_fastest: eta_axis.alternative.cloned(),
        }
    }
}

/// Best quote that is open and not closing soon, by the given axis key.
fn stable_alternative<'a, K, F>(
    quotes: &'a [Quote],
    statuses: &[PharmacyStatus],
    key: F,
) -> Option<&'a Quote>
where
    K: PartialOrd,
    F: Fn(&Quote) -> K,
{
    let mut best: Option<&Quote> = None;

    for (quote, status) in quotes.iter().zip(statuses) {
        if *status != PharmacyStatus::OpenStable {
            continue;
        }
        if best.map_or(true, |current| key(quote) < key(current)) {
            best = Some(quote);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::models::{DeliveryOption, PharmacyOffer, PharmacySource, Quote};
    use crate::pipeline::opening_hours::ROUND_THE_CLOCK;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 21, 12, 0, 0).unwrap()
    }

    /// A pharmacy open well past the closing-soon window at `now()`
    fn open_source(code: &str) -> PharmacySource {
        PharmacySource {
            code: Some(code.to_string()),
            name: code.to_string(),
            opening_hours: "Пн-Вс: 09:00-00:00".to_string(),
            opens_at: Some("2024-10-21T04:00:00Z".to_string()),
            closes_at: Some("2024-10-21T19:00:00Z".to_string()),
            ..PharmacySource::default()
        }
    }

    /// A pharmacy already past its closing instant at `now()`
    fn closed_source(code: &str) -> PharmacySource {
        PharmacySource {
            closes_at: Some("2024-10-21T10:00:00Z".to_string()),
            ..open_source(code)
        }
    }

    /// A pharmacy closing 30 minutes after `now()`
    fn closing_soon_source(code: &str) -> PharmacySource {
        PharmacySource {
            closes_at: Some("2024-10-21T12:30:00Z".to_string()),
            ..open_source(code)
        }
    }

    fn quote(source: PharmacySource, basket: f64, delivery: f64, eta: f64) -> Quote {
        let mut offer = PharmacyOffer::new(source);
        offer.total_sum = basket;
        Quote::new(offer, DeliveryOption::new(delivery, eta))
    }

    #[test]
    fn test_cheapest_and_fastest_open_are_tracked_independently() {
        let quotes = vec![
            quote(open_source("cheap_slow"), 500.0, 0.0, 90.0),
            quote(open_source("dear_fast"), 900.0, 0.0, 15.0),
        ];

        let result = select_best(&quotes, now(), &PlannerConfig::default());

        assert_eq!(
            result.cheapest_open.unwrap().offer.source.code.as_deref(),
            Some("cheap_slow")
        );
        assert_eq!(
            result.fastest_open.unwrap().offer.source.code.as_deref(),
            Some("dear_fast")
        );
        assert!(result.alternative_cheapest.is_none());
        assert!(result.alternative_fastest.is_none());
    }

    #[test]
    fn test_closed_quote_at_the_margin_becomes_alternative() {
        let quotes = vec![
            quote(open_source("open"), 1000.0, 0.0, 60.0),
            quote(closed_source("closed"), 700.0, 0.0, 60.0),
        ];

        let result = select_best(&quotes, now(), &PlannerConfig::default());

        // 700 <= 1000 * 0.7 holds, so the closed quote is offered
        assert_eq!(
            result.cheapest_open.unwrap().offer.source.code.as_deref(),
            Some("open")
        );
        assert_eq!(
            result
                .alternative_cheapest
                .unwrap()
                .offer
                .source
                .code
                .as_deref(),
            Some("closed")
        );
    }

    #[test]
    fn test_closed_quote_above_the_margin_is_ignored() {
        let quotes = vec![
            quote(open_source("open"), 1000.0, 0.0, 60.0),
            quote(closed_source("closed"), 701.0, 0.0, 60.0),
        ];

        let result = select_best(&quotes, now(), &PlannerConfig::default());

        assert!(result.alternative_cheapest.is_none());
    }

    #[test]
    fn test_closed_quote_under_the_margin_becomes_alternative() {
        let quotes = vec![
            quote(open_source("open"), 1000.0, 0.0, 60.0),
            quote(closed_source("closed"), 699.0, 0.0, 60.0),
        ];

        let result = select_best(&quotes, now(), &PlannerConfig::default());

        assert_eq!(
            result
                .alternative_cheapest
                .unwrap()
                .offer
                .source
                .code
                .as_deref(),
            Some("closed")
        );
    }

    #[test]
    fn test_eta_only_discount_does_not_override() {
        let quotes = vec![
            quote(open_source("open"), 500.0, 0.0, 100.0),
            quote(closed_source("closed"), 2000.0, 0.0, 60.0),
        ];

        let result = select_best(&quotes, now(), &PlannerConfig::default());

        // The ETA margin holds (60 <= 70) but the price margin does not
        // (2000 > 350); without a discounted cheapest candidate the
        // resolver stays with the pass-1 outcome on both axes.
        assert!(result.alternative_cheapest.is_none());
        assert!(result.alternative_fastest.is_none());
    }

    #[test]
    fn test_price_discount_carries_the_eta_discount_along() {
        let quotes = vec![
            quote(open_source("open"), 1000.0, 0.0, 100.0),
            quote(closed_source("closed"), 600.0, 0.0, 60.0),
        ];

        let result = select_best(&quotes, now(), &PlannerConfig::default());

        // Both margins hold (600 <= 700, 60 <= 70), so the closed quote
        // is offered on both axes.
        assert_eq!(
            result
                .alternative_cheapest
                .unwrap()
                .offer
                .source
                .code
                .as_deref(),
            Some("closed")
        );
        assert_eq!(
            result
                .alternative_fastest
                .unwrap()
                .offer
                .source
                .code
                .as_deref(),
            Some("closed")
        );
    }

    #[test]
    fn test_closing_soon_best_gets_stable_alternative() {
        let quotes = vec![
            quote(closing_soon_source("closing"), 500.0, 0.0, 60.0),
            quote(open_source("stable"), 800.0, 0.0, 90.0),
        ];

        let result = select_best(&quotes, now(), &PlannerConfig::default());

        assert_eq!(
            result.cheapest_open.unwrap().offer.source.code.as_deref(),
            Some("closing")
        );
        assert_eq!(
            result
                .alternative_cheapest
                .unwrap()
                .offer
                .source
                .code
                .as_deref(),
            Some("stable")
        );
    }

    #[test]
    fn test_stable_best_clears_closing_soon_alternative() {
        // The closing-soon quote is seen first and picks up an
        // alternative; the cheaper stable quote then displaces it and
        // the alternative is no longer needed.
        let quotes = vec![
            quote(closing_soon_source("closing"), 500.0, 0.0, 60.0),
            quote(open_source("stable"), 400.0, 0.0, 90.0),
        ];

        let result = select_best(&quotes, now(), &PlannerConfig::default());

        assert_eq!(
            result.cheapest_open.unwrap().offer.source.code.as_deref(),
            Some("stable")
        );
        assert!(result.alternative_cheapest.is_none());
    }

    #[test]
    fn test_no_open_quotes_yields_empty_result() {
        let quotes = vec![quote(closed_source("closed"), 100.0, 0.0, 10.0)];

        let result = select_best(&quotes, now(), &PlannerConfig::default());

        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_quote_set_yields_empty_result() {
        let result = select_best(&[], now(), &PlannerConfig::default());

        assert!(result.is_empty());
    }

    #[test]
    fn test_duplicate_quotes_cannot_displace_the_first_winner() {
        let winner = quote(open_source("winner"), 500.0, 0.0, 60.0);
        let quotes = vec![winner.clone(), winner];

        let result = select_best(&quotes, now(), &PlannerConfig::default());

        assert_eq!(
            result.cheapest_open.unwrap().offer.source.code.as_deref(),
            Some("winner")
        );
    }

    #[test]
    fn test_round_the_clock_pharmacy_counts_as_stable() {
        let all_day = PharmacySource {
            opening_hours: ROUND_THE_CLOCK.to_string(),
            ..closed_source("all_day")
        };
        let quotes = vec![quote(all_day, 900.0, 0.0, 45.0)];

        let result = select_best(&quotes, now(), &PlannerConfig::default());

        assert_eq!(
            result.cheapest_open.unwrap().offer.source.code.as_deref(),
            Some("all_day")
        );
    }
}
