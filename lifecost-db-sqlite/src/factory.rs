use async_trait::async_trait;

use lifecost_core::db::repository::{ScenarioStore, StoreError};
use lifecost_core::db::{StoreConfig, StoreFactory};

use crate::repository::SqliteStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`lifecost_core::db::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use lifecost_core::db::StoreRegistry;
/// use lifecost_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string`.
    ///
    /// Accepted connection-string values:
    /// * A bare file path, e.g. `"lifecost.db"`.  The file is created if it
    ///   does not exist.
    /// * `":memory:"` for an ephemeral in-memory database (useful for tests).
    ///
    /// Migrations run on every open.  The built-in city presets are seeded
    /// afterwards; rows that already exist, including any imported from CSV,
    /// are left untouched.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn ScenarioStore>, StoreError> {
        let store = SqliteStore::new(&config.connection_string).await?;
        store.run_migrations().await?;
        store.run_seeds().await?;
        Ok(Box::new(store))
    }
}
