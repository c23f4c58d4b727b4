//! # Seed Data Generator
//!
//! Populates a database with demo gear for development.
//!
//! ## Usage
//! ```bash
//! # Seed the configured database (WIG_DB_PATH, default ./wig.db)
//! cargo run -p wig-engine --bin seed
//!
//! # Specify database path and owner
//! cargo run -p wig-engine --bin seed -- --db ./data/wig.db --owner demo-owner
//! ```
//!
//! ## Generated Data
//! - Nested locations: Garage > Shelf > bins and bags
//! - Catalog items for a handful of camping products
//! - One ownership per product, placed and counted
//! - Two borrowers, one of them holding a checked-out item

use std::env;
use std::error::Error;

use chrono::Duration;
use tracing::info;
use wig_core::{CatalogItem, OwnerId};
use wig_engine::telemetry::init_tracing;
use wig_engine::{EngineConfig, Inventory, JwtAuthenticator};

/// (qr, name, kind, container qr)
const LOCATIONS: &[(&str, &str, &str, Option<&str>)] = &[
    ("LOC-GARAGE", "Garage", "location", None),
    ("LOC-SHELF", "Garage Shelf", "location", Some("LOC-GARAGE")),
    ("BIN-CAMP", "Camping Bin", "bin", Some("LOC-SHELF")),
    ("BIN-TOOLS", "Tool Bin", "bin", Some("LOC-SHELF")),
    ("BAG-HIKE", "Hiking Pack", "bag", Some("LOC-GARAGE")),
];

/// (barcode, name, brand, location qr, quantity)
const GEAR: &[(&str, &str, &str, &str, i64)] = &[
    ("885909950805", "Headlamp 300lm", "Petzl", "BAG-HIKE", 2),
    ("037977041172", "Two Person Tent", "Coleman", "BIN-CAMP", 1),
    ("076501140402", "Sleeping Bag 20F", "Kelty", "BIN-CAMP", 2),
    ("041205631200", "Cordless Drill", "DeWalt", "BIN-TOOLS", 1),
    ("077914002676", "Water Filter", "Sawyer", "BAG-HIKE", 1),
];

const BORROWERS: &[&str] = &["Alice", "Bob"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut config = EngineConfig::load()?;
    let mut owner = String::from("demo-owner");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.db_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--owner" | "-o" => {
                if i + 1 < args.len() {
                    owner = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: seed [--db PATH] [--owner OWNER_ID]");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let owner = OwnerId::new(owner);
    info!(db = %config.db_path.display(), owner = %owner, "Seeding database");

    let inventory = Inventory::from_config(&config).await?;
    let token = JwtAuthenticator::new(&config.jwt_secret).issue(&owner, Duration::minutes(5))?;
    let owner = inventory.authorize(&owner, &token).await?;

    for (qr, name, kind, container) in LOCATIONS {
        let location = inventory.create_location(&owner, qr, name, kind).await?.payload.location;
        let Some(container_qr) = container else {
            continue;
        };
        let parent = inventory.db().locations().find_by_qr(&owner, container_qr).await?;
        if let Some(parent) = parent {
            inventory.set_container(&owner, &location.id, &parent.id).await?;
        }
    }

    let mut ownership_ids = Vec::new();
    for (barcode, name, brand, location_qr, quantity) in GEAR {
        inventory
            .db()
            .catalog()
            .upsert(&CatalogItem {
                barcode: barcode.to_string(),
                name: name.to_string(),
                brand: brand.to_string(),
                image_url: String::new(),
            })
            .await?;

        let id = inventory.create_ownership(&owner, barcode).await?.payload.ownership_uid;
        inventory.change_quantity(&owner, &id, "set", *quantity).await?;
        inventory.relocate_ownership(&owner, &id, location_qr).await?;
        ownership_ids.push(id);
    }

    let mut borrower_ids = Vec::new();
    for name in BORROWERS {
        borrower_ids.push(inventory.create_borrower(&owner, name).await?.payload.borrower.id);
    }

    if let (Some(borrower), Some(item)) = (borrower_ids.first(), ownership_ids.first()) {
        inventory.checkout(&owner, borrower, &[item.clone()]).await?;
    }

    info!(
        locations = LOCATIONS.len(),
        ownerships = ownership_ids.len(),
        borrowers = borrower_ids.len(),
        "Seed complete"
    );

    inventory.db().close().await;
    Ok(())
}
