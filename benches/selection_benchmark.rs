use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pharmacy_delivery::models::{DeliveryOption, Location, Quote};
use pharmacy_delivery::pipeline::{best_option, fulfillment, priority_filter, shortlist};
use pharmacy_delivery::utils::fixtures::{synthetic_pharmacies, synthetic_request_lines};
use pharmacy_delivery::PlannerConfig;

use chrono::{TimeZone, Utc};

fn benchmark_selection(c: &mut Criterion) {
    let pharmacies = synthetic_pharmacies(200, 8);
    let requests = synthetic_request_lines(8);
    let address = Location::new(43.238949, 76.889709);
    let config = PlannerConfig::default();
    let now = Utc.with_ymd_and_hms(2024, 10, 21, 12, 30, 0).unwrap();

    // Benchmark the sequential priority filter on its own
    c.bench_function("priority_filter_200_pharmacies", |b| {
        b.iter(|| {
            priority_filter::filter_by_priority(black_box(pharmacies.clone()), black_box(&requests))
        })
    });

    // Benchmark the full synchronous core: filter, rank, shortlist and
    // best-option resolution over pre-built quotes
    c.bench_function("selection_core_200_pharmacies", |b| {
        b.iter(|| {
            let offers =
                priority_filter::filter_by_priority(black_box(pharmacies.clone()), &requests);
            let top = fulfillment::max_fulfillment_group(offers);

            let mut shortlisted = shortlist::closest_shortlist(&top, address, config.closest_limit);
            shortlisted.extend(shortlist::cheapest_shortlist(&top, config.cheapest_limit));

            let quotes: Vec<Quote> = shortlisted
                .into_iter()
                .map(|offer| Quote::new(offer, DeliveryOption::new(500.0, 45.0)))
                .collect();

            best_option::select_best(&quotes, now, &config)
        })
    });
}

criterion_group!(benches, benchmark_selection);
criterion_main!(benches);
