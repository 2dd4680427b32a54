use std::io::Read;

use lifecost_core::{LocationPreset, ScenarioStore, StoreError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading location preset data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresetLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Preset '{name}' has non-positive cost multiplier {value}")]
    InvalidCostMultiplier { name: String, value: Decimal },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<csv::Error> for PresetLoaderError {
    fn from(err: csv::Error) -> Self {
        PresetLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the location presets CSV file.
///
/// The CSV columns are:
/// - `name`: The city name shown to users (e.g., Portland)
/// - `state`: The two-letter state code (e.g., OR)
/// - `country`: The country name
/// - `cost_multiplier`: Cost-of-living multiplier relative to the national
///   baseline (e.g., 1.25)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LocationPresetRecord {
    pub name: String,
    pub state: String,
    pub country: String,
    pub cost_multiplier: Decimal,
}

/// Loader for location preset data from CSV files.
///
/// This loader reads CSV data and inserts it into the database via the
/// `ScenarioStore` trait, allowing it to work with any database backend.
pub struct LocationPresetLoader;

impl LocationPresetLoader {
    /// Parse location preset records from a CSV reader.
    ///
    /// Returns a vector of parsed records. The reader can be any type that
    /// implements `Read`, such as a file or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<LocationPresetRecord>, PresetLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: LocationPresetRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Load location preset records into the database.
    ///
    /// Records are validated first, then grouped by state; each state's
    /// existing presets are deleted before the new rows are inserted.
    /// This ensures that loading is idempotent - running the same load
    /// multiple times will produce the same result.
    ///
    /// States not mentioned in the records, including the seeded built-in
    /// presets, are left untouched.
    pub async fn load<S: ScenarioStore>(
        store: &S,
        records: &[LocationPresetRecord],
    ) -> Result<usize, PresetLoaderError> {
        for record in records {
            if record.cost_multiplier <= Decimal::ZERO {
                return Err(PresetLoaderError::InvalidCostMultiplier {
                    name: record.name.clone(),
                    value: record.cost_multiplier,
                });
            }
        }

        let mut inserted = 0;

        // Group records by state to delete and re-insert atomically
        let mut groups: std::collections::HashMap<String, Vec<&LocationPresetRecord>> =
            std::collections::HashMap::new();

        for record in records {
            groups
                .entry(record.state.clone())
                .or_default()
                .push(record);
        }

        for (state, group_records) in groups {
            store.delete_location_presets(&state).await?;

            for record in &group_records {
                let preset = LocationPreset {
                    name: record.name.clone(),
                    state: record.state.clone(),
                    country: record.country.clone(),
                    cost_multiplier: record.cost_multiplier,
                };

                store.insert_location_preset(&preset).await?;
                inserted += 1;
            }
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"name,state,country,cost_multiplier
Portland,OR,United States,1.25
Eugene,OR,United States,1.05
Boise,ID,United States,1.10
Nashville,TN,United States,1.15
"#;

    #[test]
    fn test_parse_csv_single_record() {
        let csv = "name,state,country,cost_multiplier\nPortland,OR,United States,1.25";

        let records = LocationPresetLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            LocationPresetRecord {
                name: "Portland".to_string(),
                state: "OR".to_string(),
                country: "United States".to_string(),
                cost_multiplier: dec!(1.25),
            }
        );
    }

    #[test]
    fn test_parse_csv_all_records() {
        let records = LocationPresetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 4);

        let states: std::collections::HashSet<_> =
            records.iter().map(|r| r.state.as_str()).collect();
        assert!(states.contains("OR"));
        assert!(states.contains("ID"));
        assert!(states.contains("TN"));
    }

    #[test]
    fn test_parse_keeps_file_order() {
        let records = LocationPresetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].name, "Portland");
        assert_eq!(records[1].name, "Eugene");
        assert_eq!(records[3].name, "Nashville");
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "name,state,country\nPortland,OR,United States";

        let result = LocationPresetLoader::parse(csv.as_bytes());

        let err = result.expect_err("Should fail for missing column");
        let PresetLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "name,state,country,cost_multiplier\nPortland,OR,United States,abc";

        let result = LocationPresetLoader::parse(csv.as_bytes());

        let err = result.expect_err("Should fail for invalid decimal");
        let PresetLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("invalid"),
            "Expected 'invalid' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv = "name,state,country,cost_multiplier\n";

        let records = LocationPresetLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }
}
