//! # Seed Data Generator
//!
//! Populates the database with development data: staff, a service catalog,
//! and a spread of sample bills so the analytics dashboard has something
//! to show.
//!
//! ## Usage
//! ```bash
//! # Seed with defaults
//! cargo run -p velvet-db --bin seed
//!
//! # Specify database path and bill count
//! cargo run -p velvet-db --bin seed -- --db ./velvet_dev.db --bills 40
//! ```

use std::env;

use velvet_core::{BillDraft, Discount, NewEmployee, NewProduct};
use velvet_db::{Database, DbConfig};

/// Staff roster: name, phone, email.
const EMPLOYEES: &[(&str, &str, &str)] = &[
    ("Amira Khan", "+1 555 0100", "amira@velvet.example"),
    ("Bea Ortiz", "+1 555 0101", "bea@velvet.example"),
    ("Chet Nguyen", "+1 555 0102", "chet@velvet.example"),
    ("Dara Okafor", "+1 555 0103", "dara@velvet.example"),
];

/// Service and retail catalog: name, price in cents, description.
const CATALOG: &[(&str, i64, &str)] = &[
    ("Haircut & Style", 2500, "Wash, cut, blow-dry"),
    ("Beard Trim", 1500, "Shape and line-up"),
    ("Kids Cut", 1800, "Under 12"),
    ("Buzz Cut", 1200, "Single guard all over"),
    ("Hot Towel Shave", 2200, "Straight razor, hot towel finish"),
    ("Hair Color", 6500, "Single-process color"),
    ("Highlights", 9500, "Partial foil"),
    ("Deep Conditioning Treatment", 3000, "Repair mask and scalp massage"),
    ("Blowout", 3500, "Wash and style, no cut"),
    ("Updo", 5500, "Event styling"),
    ("Fringe Trim", 800, "Between-cuts bang trim"),
    ("Hair Wax", 900, "Matte finish, 80g tin"),
    ("Pomade", 1100, "High shine, medium hold"),
    ("Shampoo 250ml", 1400, "Sulfate-free daily shampoo"),
    ("Conditioner 250ml", 1400, "Daily conditioner"),
    ("Beard Oil", 1600, "Argan and jojoba blend"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./velvet_dev.db");
    let mut bill_count: usize = 25;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--bills" | "-b" => {
                if i + 1 < args.len() {
                    bill_count = args[i + 1].parse().unwrap_or(25);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Velvet POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./velvet_dev.db)");
                println!("  -b, --bills <N>    Number of sample bills (default: 25)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Velvet POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Bills:    {}", bill_count);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if db.employees().count().await? > 0 {
        println!("⚠ Database already has staff records");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Staff
    let mut employee_ids = Vec::new();
    for (name, phone, email) in EMPLOYEES {
        let employee = db
            .employees()
            .insert(&NewEmployee {
                name: name.to_string(),
                phone: Some(phone.to_string()),
                email: Some(email.to_string()),
            })
            .await?;
        employee_ids.push(employee.id);
    }
    println!("✓ Seeded {} employees", employee_ids.len());

    // Catalog
    let mut product_ids = Vec::new();
    for (name, price_cents, description) in CATALOG {
        let product = db
            .products()
            .insert(&NewProduct {
                name: name.to_string(),
                price_cents: *price_cents,
                description: Some(description.to_string()),
            })
            .await?;
        product_ids.push(product.id);
    }
    println!("✓ Seeded {} catalog entries", product_ids.len());

    // Sample bills: deterministic pseudo-random spread across staff and
    // catalog, an occasional discount, quantity by repetition
    let start = std::time::Instant::now();
    let mut created = 0;

    for n in 0..bill_count {
        let employee_id = employee_ids[n % employee_ids.len()];

        let mut items = vec![product_ids[(n * 7) % product_ids.len()]];
        if n % 2 == 0 {
            items.push(product_ids[(n * 11 + 3) % product_ids.len()]);
        }
        if n % 5 == 0 {
            // Repeat a unit: two of the same retail item
            items.push(items[0]);
        }

        let discount = match n % 4 {
            0 => Some(Discount::Percent(1000)), // 10% off
            _ => None,
        };

        let draft = BillDraft {
            employee_id,
            product_ids: items,
            customer_name: None,
            customer_phone: None,
            discount,
        };

        match db.bills().create(&draft).await {
            Ok(_) => created += 1,
            Err(e) => eprintln!("Failed to create sample bill {}: {}", n, e),
        }
    }

    let elapsed = start.elapsed();
    println!("✓ Created {} sample bills in {:?}", created, elapsed);

    // Quick report sanity check
    println!();
    println!("Verifying analytics...");
    let report = db.reports().sales_report().await?;
    println!("  Months with sales:  {}", report.monthly_sales.len());
    println!("  Bills today:        {}", report.today.bill_count);
    println!("  Top products:       {}", report.top_products.len());
    println!("  Catalog size:       {}", report.total_products);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
