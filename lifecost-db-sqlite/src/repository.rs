use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use lifecost_core::{
    ExpenseCategory, FamilyStatus, Lifestyle, Location, LocationPreset, NewScenario, Relationship,
    Scenario, ScenarioStore, StoreError,
};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::FromRow;
use tracing::debug;

const CUSTOM_EXPENSE_ROWS: &str =
    "SELECT category, amount FROM scenario_custom_expenses WHERE scenario_id = ? ORDER BY category";
const ADJUSTED_OUTFLOW_ROWS: &str =
    "SELECT category, amount FROM scenario_adjusted_outflows WHERE scenario_id = ? ORDER BY category";
const INSERT_CUSTOM_EXPENSE: &str =
    "INSERT INTO scenario_custom_expenses (scenario_id, category, amount) VALUES (?, ?, ?)";
const INSERT_ADJUSTED_OUTFLOW: &str =
    "INSERT INTO scenario_adjusted_outflows (scenario_id, category, amount) VALUES (?, ?, ?)";
const DELETE_CUSTOM_EXPENSES: &str = "DELETE FROM scenario_custom_expenses WHERE scenario_id = ?";
const DELETE_ADJUSTED_OUTFLOWS: &str =
    "DELETE FROM scenario_adjusted_outflows WHERE scenario_id = ?";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    /// Inserts the built-in city presets, leaving any row that already
    /// exists (seeded earlier or imported from CSV) untouched.
    pub async fn run_seeds(&self) -> Result<(), StoreError> {
        let mut seeded = 0;
        for preset in lifecost_core::tables::city_presets() {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO location_presets (name, state, country, cost_multiplier)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&preset.name)
            .bind(&preset.state)
            .bind(&preset.country)
            .bind(preset.cost_multiplier.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
            seeded += result.rows_affected();
        }
        debug!(seeded, "built-in location presets loaded");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_category_map(
        &self,
        sql: &str,
        scenario_id: i64,
    ) -> Result<BTreeMap<ExpenseCategory, Decimal>, StoreError> {
        let rows: Vec<(String, String)> = sqlx::query_as(sql)
            .bind(scenario_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut map = BTreeMap::new();
        for (category, amount) in rows {
            let category = ExpenseCategory::parse(&category).ok_or_else(|| {
                StoreError::Database(format!("Unknown expense category '{}'", category))
            })?;
            map.insert(category, parse_decimal(&amount)?);
        }
        Ok(map)
    }

    async fn insert_category_rows(
        &self,
        sql: &str,
        scenario_id: i64,
        amounts: &BTreeMap<ExpenseCategory, Decimal>,
    ) -> Result<(), StoreError> {
        for (category, amount) in amounts {
            sqlx::query(sql)
                .bind(scenario_id)
                .bind(category.as_str())
                .bind(amount.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
        }
        Ok(())
    }

    async fn scenario_from_row(&self, row: ScenarioRow) -> Result<Scenario, StoreError> {
        let custom_expenses = if row.has_custom_expenses {
            Some(self.fetch_category_map(CUSTOM_EXPENSE_ROWS, row.id).await?)
        } else {
            None
        };
        let adjusted_outflows = self.fetch_category_map(ADJUSTED_OUTFLOW_ROWS, row.id).await?;
        row.into_scenario(custom_expenses, adjusted_outflows)
    }
}

#[derive(FromRow)]
struct ScenarioRow {
    id: i64,
    name: String,
    user_id: String,
    user_name: String,
    is_public: bool,
    lifestyle: String,
    city: String,
    state: String,
    country: String,
    cost_multiplier: String,
    is_custom_location: bool,
    relationship: String,
    num_children: u32,
    partner_income: String,
    has_custom_expenses: bool,
    monthly_income: Option<String>,
    yearly_income: Option<String>,
    monthly_expenses: Option<String>,
    children_expenses: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ScenarioRow {
    fn into_scenario(
        self,
        custom_expenses: Option<BTreeMap<ExpenseCategory, Decimal>>,
        adjusted_outflows: BTreeMap<ExpenseCategory, Decimal>,
    ) -> Result<Scenario, StoreError> {
        let lifestyle = Lifestyle::parse(&self.lifestyle)
            .ok_or_else(|| StoreError::Database(format!("Invalid lifestyle '{}'", self.lifestyle)))?;
        let relationship = Relationship::parse(&self.relationship).ok_or_else(|| {
            StoreError::Database(format!("Invalid relationship '{}'", self.relationship))
        })?;

        Ok(Scenario {
            id: self.id,
            name: self.name,
            user_id: self.user_id,
            user_name: self.user_name,
            is_public: self.is_public,
            lifestyle,
            location: Location {
                city: self.city,
                state: self.state,
                country: self.country,
                cost_multiplier: parse_decimal(&self.cost_multiplier)?,
                is_custom: self.is_custom_location,
            },
            family: FamilyStatus {
                relationship,
                num_children: self.num_children,
                partner_income: parse_decimal(&self.partner_income)?,
            },
            custom_expenses,
            monthly_income: parse_optional_decimal(&self.monthly_income)?,
            yearly_income: parse_optional_decimal(&self.yearly_income)?,
            monthly_expenses: parse_optional_decimal(&self.monthly_expenses)?,
            children_expenses: parse_optional_decimal(&self.children_expenses)?,
            adjusted_outflows,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct LocationPresetRow {
    name: String,
    state: String,
    country: String,
    cost_multiplier: String,
}

impl TryFrom<LocationPresetRow> for LocationPreset {
    type Error = StoreError;

    fn try_from(row: LocationPresetRow) -> Result<Self, Self::Error> {
        Ok(LocationPreset {
            name: row.name,
            state: row.state,
            country: row.country,
            cost_multiplier: parse_decimal(&row.cost_multiplier)?,
        })
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, StoreError> {
    s.parse::<Decimal>()
        .map_err(|e| StoreError::Database(format!("Failed to parse decimal '{}': {}", s, e)))
}

fn parse_optional_decimal(s: &Option<String>) -> Result<Option<Decimal>, StoreError> {
    s.as_ref().map(|s| parse_decimal(s)).transpose()
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    // SQLite stores timestamps in various formats, try common ones
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Database(format!("Failed to parse datetime '{}': {}", s, e)))
}

#[async_trait::async_trait]
impl ScenarioStore for SqliteStore {
    async fn create_scenario(&self, scenario: NewScenario) -> Result<Scenario, StoreError> {
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let result = sqlx::query(
            "INSERT INTO scenarios (
                name, user_id, user_name, is_public, lifestyle,
                city, state, country, cost_multiplier, is_custom_location,
                relationship, num_children, partner_income, has_custom_expenses,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&scenario.name)
        .bind(&scenario.user_id)
        .bind(&scenario.user_name)
        .bind(scenario.is_public)
        .bind(scenario.lifestyle.as_str())
        .bind(&scenario.location.city)
        .bind(&scenario.location.state)
        .bind(&scenario.location.country)
        .bind(scenario.location.cost_multiplier.to_string())
        .bind(scenario.location.is_custom)
        .bind(scenario.family.relationship.as_str())
        .bind(scenario.family.num_children)
        .bind(scenario.family.partner_income.to_string())
        .bind(scenario.custom_expenses.is_some())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();

        if let Some(expenses) = &scenario.custom_expenses {
            self.insert_category_rows(INSERT_CUSTOM_EXPENSE, id, expenses)
                .await?;
        }

        self.get_scenario(id).await
    }

    async fn get_scenario(&self, id: i64) -> Result<Scenario, StoreError> {
        let row: ScenarioRow = sqlx::query_as(
            "SELECT id, name, user_id, user_name, is_public, lifestyle,
                    city, state, country, cost_multiplier, is_custom_location,
                    relationship, num_children, partner_income, has_custom_expenses,
                    monthly_income, yearly_income, monthly_expenses, children_expenses,
                    created_at, updated_at
             FROM scenarios WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?
        .ok_or(StoreError::NotFound)?;

        self.scenario_from_row(row).await
    }

    async fn update_scenario(&self, scenario: &Scenario) -> Result<(), StoreError> {
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let result = sqlx::query(
            "UPDATE scenarios SET
                name = ?, user_id = ?, user_name = ?, is_public = ?, lifestyle = ?,
                city = ?, state = ?, country = ?, cost_multiplier = ?, is_custom_location = ?,
                relationship = ?, num_children = ?, partner_income = ?, has_custom_expenses = ?,
                monthly_income = ?, yearly_income = ?, monthly_expenses = ?, children_expenses = ?,
                updated_at = ?
             WHERE id = ?",
        )
        .bind(&scenario.name)
        .bind(&scenario.user_id)
        .bind(&scenario.user_name)
        .bind(scenario.is_public)
        .bind(scenario.lifestyle.as_str())
        .bind(&scenario.location.city)
        .bind(&scenario.location.state)
        .bind(&scenario.location.country)
        .bind(scenario.location.cost_multiplier.to_string())
        .bind(scenario.location.is_custom)
        .bind(scenario.family.relationship.as_str())
        .bind(scenario.family.num_children)
        .bind(scenario.family.partner_income.to_string())
        .bind(scenario.custom_expenses.is_some())
        .bind(scenario.monthly_income.map(|d| d.to_string()))
        .bind(scenario.yearly_income.map(|d| d.to_string()))
        .bind(scenario.monthly_expenses.map(|d| d.to_string()))
        .bind(scenario.children_expenses.map(|d| d.to_string()))
        .bind(&now)
        .bind(scenario.id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        sqlx::query(DELETE_CUSTOM_EXPENSES)
            .bind(scenario.id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        sqlx::query(DELETE_ADJUSTED_OUTFLOWS)
            .bind(scenario.id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if let Some(expenses) = &scenario.custom_expenses {
            self.insert_category_rows(INSERT_CUSTOM_EXPENSE, scenario.id, expenses)
                .await?;
        }
        self.insert_category_rows(INSERT_ADJUSTED_OUTFLOW, scenario.id, &scenario.adjusted_outflows)
            .await?;

        Ok(())
    }

    async fn delete_scenario(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query(DELETE_CUSTOM_EXPENSES)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        sqlx::query(DELETE_ADJUSTED_OUTFLOWS)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let result = sqlx::query("DELETE FROM scenarios WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn list_scenarios(&self, user_id: Option<&str>) -> Result<Vec<Scenario>, StoreError> {
        let rows: Vec<ScenarioRow> = match user_id {
            Some(user_id) => {
                sqlx::query_as(
                    "SELECT id, name, user_id, user_name, is_public, lifestyle,
                            city, state, country, cost_multiplier, is_custom_location,
                            relationship, num_children, partner_income, has_custom_expenses,
                            monthly_income, yearly_income, monthly_expenses, children_expenses,
                            created_at, updated_at
                     FROM scenarios WHERE user_id = ? ORDER BY updated_at DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(
                    "SELECT id, name, user_id, user_name, is_public, lifestyle,
                            city, state, country, cost_multiplier, is_custom_location,
                            relationship, num_children, partner_income, has_custom_expenses,
                            monthly_income, yearly_income, monthly_expenses, children_expenses,
                            created_at, updated_at
                     FROM scenarios ORDER BY updated_at DESC",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut scenarios = Vec::with_capacity(rows.len());
        for row in rows {
            scenarios.push(self.scenario_from_row(row).await?);
        }
        Ok(scenarios)
    }

    async fn list_public_scenarios(&self) -> Result<Vec<Scenario>, StoreError> {
        let rows: Vec<ScenarioRow> = sqlx::query_as(
            "SELECT id, name, user_id, user_name, is_public, lifestyle,
                    city, state, country, cost_multiplier, is_custom_location,
                    relationship, num_children, partner_income, has_custom_expenses,
                    monthly_income, yearly_income, monthly_expenses, children_expenses,
                    created_at, updated_at
             FROM scenarios WHERE is_public = 1 ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut scenarios = Vec::with_capacity(rows.len());
        for row in rows {
            scenarios.push(self.scenario_from_row(row).await?);
        }
        Ok(scenarios)
    }

    async fn get_location_preset(
        &self,
        name: &str,
        state: &str,
    ) -> Result<LocationPreset, StoreError> {
        let row: LocationPresetRow = sqlx::query_as(
            "SELECT name, state, country, cost_multiplier
             FROM location_presets WHERE name = ? AND state = ?",
        )
        .bind(name)
        .bind(state)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?
        .ok_or(StoreError::NotFound)?;

        row.try_into()
    }

    async fn list_location_presets(&self) -> Result<Vec<LocationPreset>, StoreError> {
        let rows: Vec<LocationPresetRow> = sqlx::query_as(
            "SELECT name, state, country, cost_multiplier
             FROM location_presets ORDER BY state, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn insert_location_preset(&self, preset: &LocationPreset) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO location_presets (name, state, country, cost_multiplier)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&preset.name)
        .bind(&preset.state)
        .bind(&preset.country)
        .bind(preset.cost_multiplier.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_location_presets(&self, state: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM location_presets WHERE state = ?")
            .bind(state)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}
