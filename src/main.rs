use pharmacy_delivery::models::Quote;
use pharmacy_delivery::pipeline::DeliveryPlanner;
use pharmacy_delivery::utils::fixtures::{
    demo_now, demo_pharmacies, demo_pricing, demo_request, StaticInventory,
};

#[tokio::main]
async fn main() {
    let inventory = StaticInventory {
        pharmacies: demo_pharmacies(),
    };
    let planner = DeliveryPlanner::new(inventory, demo_pricing());

    let request = demo_request();
    let now = demo_now();

    println!("Resolving order for {}:", request.city);
    for line in &request.skus {
        println!("  {} x{}", line.sku, line.count_desired);
    }
    println!(
        "Drop-off at ({:.6}, {:.6}), evaluated at {}",
        request.address.lat, request.address.lon, now
    );
    println!("------------------------------------------");

    let result = match planner.plan(&request, now).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Planning failed: {}", e);
            return;
        }
    };

    if result.is_empty() {
        println!("No viable delivery option found!");
        return;
    }

    print_slot("Cheapest open", &result.cheapest_open);
    print_slot("  alternative", &result.alternative_cheapest);
    print_slot("Fastest open", &result.fastest_open);
    print_slot("  alternative", &result.alternative_fastest);

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("\nSerialized result:\n{}", json),
        Err(e) => eprintln!("Could not serialize the result: {}", e),
    }
}

fn print_slot(label: &str, slot: &Option<Quote>) {
    match slot {
        Some(quote) => {
            println!(
                "{}: {} ({}) | basket {:.2} + delivery {:.2} = {:.2}, eta {:.0} min",
                label,
                quote.offer.source.name,
                quote.offer.source.address.as_deref().unwrap_or("-"),
                quote.offer.total_sum,
                quote.delivery_option.price,
                quote.total_price,
                quote.delivery_option.eta
            );
            for replaced in &quote.offer.replaced_skus {
                println!(
                    "    substituted {} with {}",
                    replaced.original_sku, replaced.replacement_sku
                );
            }
        }
        None => println!("{}: none", label),
    }
}
