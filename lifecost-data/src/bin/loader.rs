use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lifecost_data::LocationPresetLoader;
use lifecost_db_sqlite::SqliteStore;

/// Load location presets from a CSV file into the database.
///
/// The CSV file should have the following columns:
/// - name: The city name (e.g., Portland)
/// - state: The two-letter state code (e.g., OR)
/// - country: The country name
/// - cost_multiplier: Cost-of-living multiplier (e.g., 1.25)
#[derive(Parser, Debug)]
#[command(name = "lifecost-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing location presets
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database path (created if missing)
    #[arg(short, long, default_value = "lifecost.db")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Seed the built-in city presets after migrations
    #[arg(short, long, default_value_t = false)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let store = SqliteStore::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        store
            .run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    if args.seed {
        println!("Seeding built-in city presets...");
        store.run_seeds().await.context("Failed to run seeds")?;
        println!("Seeds complete.");
    }

    println!("Loading location presets from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = LocationPresetLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let inserted = LocationPresetLoader::load(&store, &records)
        .await
        .context("Failed to load location presets into database")?;

    println!(
        "Successfully loaded {} location presets into the database.",
        inserted
    );

    Ok(())
}
