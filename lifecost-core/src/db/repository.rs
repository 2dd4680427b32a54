use async_trait::async_trait;
use thiserror::Error;

use crate::models::{LocationPreset, NewScenario, Scenario};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[async_trait]
pub trait ScenarioStore: Send + Sync {
    // Saved scenarios
    async fn create_scenario(&self, scenario: NewScenario) -> Result<Scenario, StoreError>;

    async fn get_scenario(&self, id: i64) -> Result<Scenario, StoreError>;

    async fn update_scenario(&self, scenario: &Scenario) -> Result<(), StoreError>;

    async fn delete_scenario(&self, id: i64) -> Result<(), StoreError>;

    async fn list_scenarios(&self, user_id: Option<&str>) -> Result<Vec<Scenario>, StoreError>;

    async fn list_public_scenarios(&self) -> Result<Vec<Scenario>, StoreError>;

    // Location presets
    async fn get_location_preset(
        &self,
        name: &str,
        state: &str,
    ) -> Result<LocationPreset, StoreError>;

    async fn list_location_presets(&self) -> Result<Vec<LocationPreset>, StoreError>;

    async fn insert_location_preset(&self, preset: &LocationPreset) -> Result<(), StoreError>;

    async fn delete_location_presets(&self, state: &str) -> Result<(), StoreError>;
}
