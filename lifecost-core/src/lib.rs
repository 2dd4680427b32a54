pub mod calculations;
pub mod db;
pub mod format;
pub mod models;
pub mod tables;
pub mod wizard;

pub use db::repository::{ScenarioStore, StoreError};
pub use models::*;
