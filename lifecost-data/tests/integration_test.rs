//! Integration tests for location preset loading using the SQLite backend.

use lifecost_core::{ScenarioStore, StoreError};
use lifecost_data::{LocationPresetLoader, PresetLoaderError};
use lifecost_db_sqlite::SqliteStore;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sqlx::sqlite::SqlitePoolOptions;

const TEST_CSV: &str = include_str!("../test-data/location_presets.csv");

/// Sets up a test database with migrations run but NO seed data.
/// This simulates a user running --migrate without --seed.
async fn setup_test_db_without_seeds() -> SqliteStore {
    let pool = SqlitePoolOptions::new()
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    let store = SqliteStore::new_with_pool(pool).await;
    store
        .run_migrations()
        .await
        .expect("Failed to run migrations");

    store
}

async fn setup_test_db() -> SqliteStore {
    let store = setup_test_db_without_seeds().await;
    store.run_seeds().await.expect("Failed to run seeds");
    store
}

#[tokio::test]
async fn test_load_all_presets() {
    let store = setup_test_db().await;

    let records = LocationPresetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let inserted = LocationPresetLoader::load(&store, &records)
        .await
        .expect("Failed to load presets");

    assert_eq!(inserted, 6);
}

#[tokio::test]
async fn test_load_and_retrieve_presets() {
    let store = setup_test_db().await;

    let records = LocationPresetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    LocationPresetLoader::load(&store, &records)
        .await
        .expect("Failed to load presets");

    let portland = store
        .get_location_preset("Portland", "OR")
        .await
        .expect("Failed to get Portland");

    assert_eq!(portland.country, "United States");
    assert_eq!(portland.cost_multiplier, dec!(1.25));

    let all = store
        .list_location_presets()
        .await
        .expect("Failed to list presets");
    assert!(all.iter().any(|p| p.name == "Eugene" && p.state == "OR"));
}

#[tokio::test]
async fn test_load_is_idempotent() {
    let store = setup_test_db().await;

    let records = LocationPresetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

    // Load twice
    LocationPresetLoader::load(&store, &records)
        .await
        .expect("First load failed");
    LocationPresetLoader::load(&store, &records)
        .await
        .expect("Second load failed");

    let all = store
        .list_location_presets()
        .await
        .expect("Failed to list presets");
    let oregon: Vec<_> = all.iter().filter(|p| p.state == "OR").collect();
    assert_eq!(oregon.len(), 2);
}

#[tokio::test]
async fn test_load_replaces_existing_state_presets() {
    let store = setup_test_db().await;

    // Insert an existing preset for a state the CSV also covers
    let salem = lifecost_core::LocationPreset {
        name: "Salem".to_string(),
        state: "OR".to_string(),
        country: "United States".to_string(),
        cost_multiplier: dec!(1.00),
    };
    store
        .insert_location_preset(&salem)
        .await
        .expect("Failed to insert initial preset");

    let records = LocationPresetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    LocationPresetLoader::load(&store, &records)
        .await
        .expect("Failed to load presets");

    let result = store.get_location_preset("Salem", "OR").await;
    assert!(matches!(result, Err(StoreError::NotFound)));

    store
        .get_location_preset("Portland", "OR")
        .await
        .expect("Portland should replace Salem");
}

#[tokio::test]
async fn test_load_preserves_other_states() {
    let store = setup_test_db().await;

    // The CSV does not mention CO, so the seeded Denver preset must survive.
    let records = LocationPresetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    LocationPresetLoader::load(&store, &records)
        .await
        .expect("Failed to load presets");

    let denver = store
        .get_location_preset("Denver", "CO")
        .await
        .expect("Seeded Denver preset should survive");
    assert_eq!(denver.cost_multiplier, dec!(1.4));
}

#[tokio::test]
async fn test_load_rejects_non_positive_multiplier() {
    let store = setup_test_db_without_seeds().await;

    let csv = "name,state,country,cost_multiplier\nPortland,OR,United States,0";
    let records = LocationPresetLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

    let result = LocationPresetLoader::load(&store, &records).await;

    assert_eq!(
        result,
        Err(PresetLoaderError::InvalidCostMultiplier {
            name: "Portland".to_string(),
            value: dec!(0),
        })
    );

    // Nothing should have been written
    let all = store
        .list_location_presets()
        .await
        .expect("Failed to list presets");
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_load_fails_without_migrations() {
    let pool = SqlitePoolOptions::new()
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    let store = SqliteStore::new_with_pool(pool).await;

    let records = LocationPresetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

    let result = LocationPresetLoader::load(&store, &records).await;

    let err = result.expect_err("Should fail when tables are missing");
    assert!(
        matches!(err, PresetLoaderError::Store(StoreError::Database(_))),
        "Expected Store(Database) error, got: {:?}",
        err
    );
}
