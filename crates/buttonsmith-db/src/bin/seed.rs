//! # Seed Data Generator
//!
//! Populates the database with a development catalog.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p buttonsmith-db --bin seed
//!
//! # Specify database path
//! cargo run -p buttonsmith-db --bin seed -- --db ./data/shop.db
//!
//! # Generate extra filler buttons per leaf category
//! cargo run -p buttonsmith-db --bin seed -- --per-category 25
//! ```
//!
//! ## Generated Catalog
//! A three-level category tree with buttons at every level:
//! ```text
//! Band Buttons
//! ├── Punk
//! │   └── Hardcore
//! └── Metal
//! Holiday Buttons
//! ├── Halloween
//! └── Winter
//! Funny Sayings
//! ```
//! After inserting, the seeder prints the aggregated per-category counts and
//! a sample pricing table so the storefront numbers can be eyeballed.

use std::env;

use buttonsmith_core::{catalog, pricing, PricingConfig};
use buttonsmith_db::repository::button::new_button;
use buttonsmith_db::repository::category::new_category;
use buttonsmith_db::{Database, DbConfig};

/// (name, slug, parent slug) - parents must appear before children.
const CATEGORY_TREE: &[(&str, &str, Option<&str>)] = &[
    ("Band Buttons", "band-buttons", None),
    ("Punk", "punk", Some("band-buttons")),
    ("Hardcore", "hardcore", Some("punk")),
    ("Metal", "metal", Some("band-buttons")),
    ("Holiday Buttons", "holiday-buttons", None),
    ("Halloween", "halloween", Some("holiday-buttons")),
    ("Winter", "winter", Some("holiday-buttons")),
    ("Funny Sayings", "funny-sayings", None),
];

/// (sku, name, category slug) - a handful of named designs.
const BUTTONS: &[(&str, &str, Option<&str>)] = &[
    ("BTN-BAND-001", "Generic Band Logo", Some("band-buttons")),
    ("BTN-BAND-002", "Tour 2026", Some("band-buttons")),
    ("BTN-PUNK-001", "Anarchy Symbol", Some("punk")),
    ("BTN-HC-001", "Straight Edge X", Some("hardcore")),
    ("BTN-HC-002", "Circle Pit Veteran", Some("hardcore")),
    ("BTN-HC-003", "Posi Vibes", Some("hardcore")),
    ("BTN-MTL-001", "Devil Horns", Some("metal")),
    ("BTN-HW-001", "Pumpkin Grin", Some("halloween")),
    ("BTN-HW-002", "Black Cat", Some("halloween")),
    ("BTN-WNT-001", "Snowflake", Some("winter")),
    ("BTN-FUN-001", "I Pressed This Myself", Some("funny-sayings")),
    ("BTN-FUN-002", "Ask Me About My Buttons", Some("funny-sayings")),
    // Uncategorized: excluded from every category count.
    ("BTN-MISC-001", "Mystery Button", None),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./buttonsmith_dev.db");
    let mut per_category: usize = 0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--per-category" | "-p" => {
                if i + 1 < args.len() {
                    per_category = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Buttonsmith Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>           Database file path (default: ./buttonsmith_dev.db)");
                println!("  -p, --per-category <N>    Extra filler buttons per category (default: 0)");
                println!("  -h, --help                Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Buttonsmith Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to double-seed
    let existing = db.categories().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} categories", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Insert the category tree, resolving parent slugs to generated ids
    println!();
    println!("Inserting categories...");

    let mut id_by_slug = std::collections::HashMap::new();
    for (name, slug, parent_slug) in CATEGORY_TREE {
        let parent_id = parent_slug.map(|p| {
            id_by_slug
                .get(p)
                .cloned()
                .expect("parent listed before child in CATEGORY_TREE")
        });
        let category = new_category(name, slug, parent_id.as_deref());
        id_by_slug.insert(slug.to_string(), category.id.clone());
        db.categories().insert(&category).await?;
    }

    println!("  {} categories", CATEGORY_TREE.len());

    // Insert the named designs
    println!("Inserting buttons...");

    let mut inserted = 0;
    for (sku, name, category_slug) in BUTTONS {
        let category_id = category_slug.map(|s| id_by_slug[s].clone());
        let button = new_button(sku, name, category_id.as_deref());
        db.buttons().insert(&button).await?;
        inserted += 1;
    }

    // Optional filler, evenly spread across the tree
    for (slug, category_id) in &id_by_slug {
        for n in 0..per_category {
            let sku = format!("BTN-{}-F{:03}", slug.to_uppercase(), n);
            let name = format!("Filler Design {} #{}", slug, n);
            let button = new_button(&sku, &name, Some(category_id));
            db.buttons().insert(&button).await?;
            inserted += 1;
        }
    }

    println!("  {} buttons", inserted);

    // Default pricing configuration
    db.settings()
        .save_pricing_config(&PricingConfig::default())
        .await?;
    println!("✓ Default pricing configuration saved");

    // Show what the storefront will see
    println!();
    println!("Category counts (direct / total):");

    let categories = db.categories().list_active().await?;
    let buttons = db.buttons().list_active().await?;
    let counts = catalog::count_buttons_by_category(&categories, &buttons);

    for (name, slug, _) in CATEGORY_TREE {
        let id = &id_by_slug[*slug];
        let c = &counts[id];
        println!("  {:<18} {:>3} / {:>3}", name, c.direct, c.total);
    }

    println!();
    println!("Sample pricing (defaults):");

    let config = db.settings().pricing_config().await?;
    for qty in [1, 50, 100, 150, 200, 500] {
        let quote = pricing::quote(qty, &config);
        println!(
            "  {:>4} buttons @ {} = {} (+{} shipping = {})",
            qty, quote.unit_price, quote.subtotal, quote.shipping, quote.total
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
