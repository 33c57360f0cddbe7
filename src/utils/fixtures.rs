// Demo dataset and in-memory collaborators

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
    DeliveryOption, Location, OrderRequest, PharmacySource, PharmacyStock, SkuRequest,
    StockProduct,
};
use crate::services::{
    DeliveryPricing, InventorySearch, PricingError, PricingRequest, SearchError,
};

/// In-memory inventory search returning a fixed pharmacy list
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    pub pharmacies: Vec<PharmacyStock>,
}

#[async_trait]
impl InventorySearch for StaticInventory {
    async fn search(
        &self,
        _city: &str,
        _skus: &[SkuRequest],
    ) -> Result<Vec<PharmacyStock>, SearchError> {
        Ok(self.pharmacies.clone())
    }
}

/// In-memory pricing service with per-pharmacy delivery options
#[derive(Debug, Clone, Default)]
pub struct StaticPricing {
    pub options: HashMap<String, Vec<DeliveryOption>>,
}

#[async_trait]
impl DeliveryPricing for StaticPricing {
    async fn delivery_options(
        &self,
        request: &PricingRequest,
    ) -> Result<Vec<DeliveryOption>, PricingError> {
        match self.options.get(&request.source_code) {
            Some(options) => Ok(options.clone()),
            None => Err(PricingError::Rejected {
                status: "unknown_pharmacy".to_string(),
            }),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn pharmacy(
    code: &str,
    name: &str,
    address: &str,
    lat: f64,
    lon: f64,
    opening_hours: &str,
    opens_at: &str,
    closes_at: &str,
    products: Vec<StockProduct>,
) -> PharmacyStock {
    PharmacyStock {
        source: PharmacySource {
            code: Some(code.to_string()),
            name: name.to_string(),
            city: Some("Алматы".to_string()),
            address: Some(address.to_string()),
            lat: Some(lat),
            lon: Some(lon),
            opening_hours: opening_hours.to_string(),
            opens_at: Some(opens_at.to_string()),
            closes_at: Some(closes_at.to_string()),
        },
        products,
    }
}

fn spray(price: f64) -> StockProduct {
    StockProduct::new("dospray_15ml", "Доспрей спрей назальный 15 мл", price, 1)
}

fn tablets_with_analog(analog_sku: &str, analog_name: &str, analog_price: f64) -> StockProduct {
    StockProduct::new("viagra_100mg", "Виагра таблетки 100 мг №4", 0.0, 0).with_analogs(vec![
        StockProduct::new(analog_sku, analog_name, analog_price, 1),
    ])
}

/// Three-pharmacy demo dataset: a nasal spray stocked everywhere and a
/// tablet SKU only available through per-pharmacy substitutes.
pub fn demo_pharmacies() -> Vec<PharmacyStock> {
    vec![
        pharmacy(
            "apteka_brusilovskogo_163",
            "Аптека 1",
            "Улица Брусиловского, 163",
            43.242913,
            76.877005,
            "Пн-Вс: 08:00-23:00",
            "2024-10-21T03:00:00Z",
            "2024-10-21T18:00:00Z",
            vec![
                spray(750.0),
                tablets_with_analog("kamagra_100mg", "Камагра таблетки 100 мг №4", 5300.0),
            ],
        ),
        pharmacy(
            "apteka_abaya_115",
            "Аптека 2",
            "Проспект Абая, 115",
            43.239826,
            76.902216,
            "Пн-Вс: 09:00-00:00",
            "2024-10-21T04:00:00Z",
            "2024-10-21T19:00:00Z",
            vec![
                spray(760.0),
                tablets_with_analog("synagra_100mg", "Синегра таблетки 100 мг №4", 8000.0),
            ],
        ),
        pharmacy(
            "apteka_makataeva_53",
            "Аптека 3",
            "Улица Макатаева, 53",
            43.264685,
            76.950991,
            "Пн-Вс: 09:00-00:00",
            "2024-10-21T04:00:00Z",
            "2024-10-21T19:00:00Z",
            vec![
                spray(775.0),
                tablets_with_analog("silfect_100mg", "Силфект таблетки 100 мг №4", 4700.0),
            ],
        ),
    ]
}

/// Delivery options for the demo pharmacies: a standard courier tier
/// everywhere, plus an express tier in the city centre.
pub fn demo_pricing() -> StaticPricing {
    let mut options = HashMap::new();
    options.insert(
        "apteka_brusilovskogo_163".to_string(),
        vec![DeliveryOption::new(500.0, 45.0)],
    );
    options.insert(
        "apteka_abaya_115".to_string(),
        vec![
            DeliveryOption::new(450.0, 50.0),
            DeliveryOption::new(900.0, 25.0),
        ],
    );
    options.insert(
        "apteka_makataeva_53".to_string(),
        vec![DeliveryOption::new(600.0, 60.0)],
    );
    StaticPricing { options }
}

/// Demo order: one unit of the spray and one of the tablets, delivered
/// to central Almaty.
pub fn demo_request() -> OrderRequest {
    OrderRequest::new(
        "Алматы",
        vec![
            SkuRequest::new("dospray_15ml", 1),
            SkuRequest::new("viagra_100mg", 1),
        ],
        Location::new(43.238949, 76.889709),
    )
}

/// Mid-day evaluation instant matching the demo opening windows
pub fn demo_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 21, 12, 30, 0).unwrap()
}

/// Synthetic candidate set for benchmarks: `count` pharmacies on a grid,
/// stock thinning out with the pharmacy index.
pub fn synthetic_pharmacies(count: usize, sku_count: usize) -> Vec<PharmacyStock> {
    (0..count)
        .map(|i| {
            let products = (0..sku_count)
                .map(|j| {
                    let price = 100.0 + ((i * 7 + j * 13) % 900) as f64;
                    let quantity = if (i + j) % 4 == 0 { 0 } else { 5 };
                    StockProduct::new(format!("sku_{}", j), format!("Product {}", j), price, quantity)
                        .with_analogs(vec![StockProduct::new(
                            format!("sku_{}_sub", j),
                            format!("Product {} substitute", j),
                            price + 50.0,
                            5,
                        )])
                })
                .collect();

            pharmacy(
                &format!("apteka_{}", i),
                &format!("Аптека {}", i),
                &format!("Улица Тестовая, {}", i),
                43.2 + (i % 10) as f64 * 0.01,
                76.8 + (i / 10) as f64 * 0.01,
                "Пн-Вс: 08:00-23:00",
                "2024-10-21T03:00:00Z",
                "2024-10-21T18:00:00Z",
                products,
            )
        })
        .collect()
}

/// Request lines matching [`synthetic_pharmacies`]
pub fn synthetic_request_lines(sku_count: usize) -> Vec<SkuRequest> {
    (0..sku_count)
        .map(|j| SkuRequest::new(format!("sku_{}", j), 1))
        .collect()
}
