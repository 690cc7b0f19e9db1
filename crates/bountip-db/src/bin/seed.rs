//! # Seed Data Generator
//!
//! Creates a demo outlet with price tiers and products for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p bountip-db --bin seed
//!
//! # Specify database path and business
//! cargo run -p bountip-db --bin seed -- --db ./data/bountip.db --business demo-biz
//! ```

use std::env;

use bountip_core::{
    Money, NewOutlet, NewPriceTier, NewProduct, Percentage, PricingRule, DEFAULT_CURRENCY,
};
use bountip_db::{Database, DbConfig};

/// (name, description, rule kind, basis points)
const TIERS: &[(&str, &str, &str, u32)] = &[
    ("Retail", "Walk-in customers", "markup", 1000),
    ("Wholesale", "Bulk buyers", "discount", 500),
    ("Staff", "Employee pricing", "discount", 2500),
    ("Event", "Catering and events", "markup", 2000),
];

/// (name, price in minor units)
const PRODUCTS: &[(&str, i64)] = &[
    ("Jollof Rice", 250_000),
    ("Fried Plantain", 80_000),
    ("Suya Platter", 450_000),
    ("Chapman", 150_000),
    ("Zobo", 60_000),
    ("Pepper Soup", 320_000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bountip_dev.db");
    let mut business_id = String::from("demo-business");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--db" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "-b" | "--business" => {
                if i + 1 < args.len() {
                    business_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "-h" | "--help" => {
                println!("Bountip Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (default: ./bountip_dev.db)");
                println!("  -b, --business <ID>    Business id (default: demo-business)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bountip Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Business: {}", business_id);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.outlets().list_by_business(&business_id).await?;
    if !existing.is_empty() {
        println!("⚠ Business already has {} outlet(s)", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let outlet = db
        .outlets()
        .create(
            &business_id,
            &NewOutlet::parse("Demo Outlet", None, DEFAULT_CURRENCY)?,
        )
        .await?;
    println!("✓ Created outlet #{} ({})", outlet.id, outlet.currency);

    let mut tier_ids = Vec::with_capacity(TIERS.len());
    for (name, description, kind, bps) in TIERS {
        let percent = Percentage::try_from_bps(*bps)?;
        let rule = match *kind {
            "markup" => PricingRule::markup(percent),
            _ => PricingRule::discount(percent),
        };
        let tier = db
            .price_tiers()
            .create(
                outlet.id,
                &NewPriceTier {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    rule,
                    is_active: true,
                },
            )
            .await?;
        println!("  + tier {:<10} {}", tier.name, percent);
        tier_ids.push(tier.id);
    }

    for (idx, (name, price_cents)) in PRODUCTS.iter().enumerate() {
        // every other product is priced through a tier
        let price_tier_id = (idx % 2 == 0).then(|| tier_ids[idx / 2 % tier_ids.len()]);

        let product = db
            .products()
            .create(
                outlet.id,
                &NewProduct {
                    name: name.to_string(),
                    price: Money::from_cents(*price_cents),
                    price_tier_id,
                },
            )
            .await?;
        println!("  + product {:<16} {}", product.name, product.price().format_grouped());
    }

    println!();
    println!("✓ Seeded {} tiers and {} products", TIERS.len(), PRODUCTS.len());

    db.close().await;
    Ok(())
}
