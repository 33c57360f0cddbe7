// Integration tests for the sequential priority filter

use pharmacy_delivery::models::{PharmacySource, PharmacyStock, SkuRequest, StockProduct};
use pharmacy_delivery::pipeline::priority_filter::filter_by_priority;

fn pharmacy(code: &str, products: Vec<StockProduct>) -> PharmacyStock {
    PharmacyStock {
        source: PharmacySource {
            code: Some(code.to_string()),
            name: code.to_string(),
            ..PharmacySource::default()
        },
        products,
    }
}

#[test]
fn test_request_order_changes_survivors() {
    // Pharmacy A stocks only SKU1, pharmacy B only SKU2. Whichever SKU
    // leads the request decides who survives the rounds.
    let build = || {
        vec![
            pharmacy("a", vec![StockProduct::new("sku1", "One", 100.0, 5)]),
            pharmacy("b", vec![StockProduct::new("sku2", "Two", 100.0, 5)]),
        ]
    };

    let sku1_first = filter_by_priority(
        build(),
        &[SkuRequest::new("sku1", 1), SkuRequest::new("sku2", 1)],
    );
    let sku2_first = filter_by_priority(
        build(),
        &[SkuRequest::new("sku2", 1), SkuRequest::new("sku1", 1)],
    );

    assert_eq!(sku1_first.len(), 1);
    assert_eq!(sku1_first[0].source.code.as_deref(), Some("a"));

    assert_eq!(sku2_first.len(), 1);
    assert_eq!(sku2_first[0].source.code.as_deref(), Some("b"));
}

#[test]
fn test_substitution_is_monotonic_per_round() {
    // The original is replaced only when its own stock is insufficient;
    // a pharmacy with enough stock never substitutes, however cheap the
    // analog.
    let cheap_analog = StockProduct::new("analog", "Analog", 1.0, 10);
    let stocked =
        StockProduct::new("sku1", "One", 100.0, 5).with_analogs(vec![cheap_analog.clone()]);
    let starved = StockProduct::new("sku1", "One", 100.0, 0).with_analogs(vec![cheap_analog]);

    let offers = filter_by_priority(
        vec![pharmacy("stocked", vec![stocked]), pharmacy("starved", vec![starved])],
        &[SkuRequest::new("sku1", 2)],
    );

    assert_eq!(offers.len(), 2);

    let stocked_offer = offers
        .iter()
        .find(|o| o.source.code.as_deref() == Some("stocked"))
        .unwrap();
    assert_eq!(stocked_offer.replacements_needed, 0);
    assert_eq!(stocked_offer.lines[0].sku, "sku1");
    assert_eq!(stocked_offer.total_sum, 200.0);

    let starved_offer = offers
        .iter()
        .find(|o| o.source.code.as_deref() == Some("starved"))
        .unwrap();
    assert_eq!(starved_offer.replacements_needed, 1);
    assert_eq!(starved_offer.lines[0].sku, "analog");
    assert_eq!(starved_offer.total_sum, 2.0);
}

#[test]
fn test_unmatched_lines_are_never_priced_as_zero() {
    let offers = filter_by_priority(
        vec![pharmacy(
            "p",
            vec![
                StockProduct::new("sku1", "One", 100.0, 5),
                StockProduct::new("sku2", "Two", 9999.0, 0),
            ],
        )],
        &[SkuRequest::new("sku1", 1), SkuRequest::new("sku2", 1)],
    );

    // Only the resolved line contributes; the failed one is absent
    // rather than contributing zero.
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].resolved_count(), 1);
    assert_eq!(offers[0].total_sum, 100.0);
}

#[test]
fn test_all_pharmacies_failing_a_round_continues_with_previous_set() {
    let build = |code: &str, price: f64| {
        pharmacy(
            code,
            vec![
                StockProduct::new("sku1", "One", price, 5),
                StockProduct::new("sku3", "Three", price, 5),
            ],
        )
    };

    let offers = filter_by_priority(
        vec![build("a", 100.0), build("b", 120.0)],
        &[
            SkuRequest::new("sku1", 1),
            SkuRequest::new("sku2", 1),
            SkuRequest::new("sku3", 1),
        ],
    );

    // Nobody stocks sku2; both pharmacies continue and resolve sku3.
    assert_eq!(offers.len(), 2);
    assert!(offers.iter().all(|o| o.resolved_count() == 2));
}

#[test]
fn test_output_keeps_input_order() {
    let build = |code: &str| pharmacy(code, vec![StockProduct::new("sku1", "One", 100.0, 5)]);

    let offers = filter_by_priority(
        vec![build("first"), build("second"), build("third")],
        &[SkuRequest::new("sku1", 1)],
    );

    let codes: Vec<_> = offers
        .iter()
        .map(|o| o.source.code.clone().unwrap())
        .collect();
    assert_eq!(codes, vec!["first", "second", "third"]);
}
