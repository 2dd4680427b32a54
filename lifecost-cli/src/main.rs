use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use lifecost_core::db::StoreConfig;
use lifecost_core::models::{ExpenseCategory, Lifestyle};

mod app;
mod args;

use args::{parse_decimal_arg, parse_expense_arg, parse_lifestyle_arg};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Lifestyle cost explorer.
///
/// Prices a monthly budget for a lifestyle tier, family and location,
/// estimates the taxes on a gross income, and searches for the income
/// whose take-home pay covers the budget. Plans can be saved as
/// scenarios in the configured database.
#[derive(Debug, Parser)]
#[command(name = "lifecost")]
struct Cli {
    /// Database backend to use.
    #[arg(long, global = true, default_value = "sqlite")]
    backend: String,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `lifecost.db`) or `:memory:`.
    #[arg(long, global = true, default_value = "lifecost.db")]
    db: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate federal, state, city and payroll taxes on a gross income.
    Taxes(TaxesArgs),

    /// Find the gross annual income that nets a monthly take-home target.
    RequiredIncome(RequiredIncomeArgs),

    /// Price a lifestyle and solve for the income that sustains it.
    Plan(PlanArgs),

    /// Inspect and manage saved scenarios.
    Scenarios {
        #[command(subcommand)]
        command: ScenariosCommand,
    },

    /// List the stored location presets.
    Locations,
}

#[derive(Debug, clap::Args)]
struct TaxesArgs {
    /// Gross annual income.
    #[arg(long, value_parser = parse_decimal_arg)]
    income: Decimal,

    /// Two-letter state code.
    #[arg(long)]
    state: String,

    /// City, as spelled in the municipal tax table.
    #[arg(long)]
    city: Option<String>,

    /// Estimate for a married household.
    #[arg(long)]
    married: bool,

    /// Partner's gross annual income (married households only).
    #[arg(long, value_parser = parse_decimal_arg, default_value = "0")]
    partner_income: Decimal,
}

#[derive(Debug, clap::Args)]
struct RequiredIncomeArgs {
    /// Desired monthly take-home pay.
    #[arg(long, value_parser = parse_decimal_arg)]
    target: Decimal,

    /// Two-letter state code.
    #[arg(long)]
    state: String,

    /// Solve for a married household.
    #[arg(long)]
    married: bool,

    /// Partner's gross annual income (married households only).
    #[arg(long, value_parser = parse_decimal_arg, default_value = "0")]
    partner_income: Decimal,
}

#[derive(Debug, clap::Args)]
struct PlanArgs {
    /// Lifestyle tier: modest, comfortable, luxury or custom.
    #[arg(long, value_parser = parse_lifestyle_arg, default_value = "modest")]
    lifestyle: Lifestyle,

    /// Where the household lives, as "City, ST".
    /// Stored presets are matched first; anything else is a custom location.
    #[arg(long)]
    location: Option<String>,

    /// Cost-of-living multiplier for a custom location
    /// (1.0 = national average). Overrides any stored preset.
    #[arg(long, value_parser = parse_decimal_arg)]
    cost_multiplier: Option<Decimal>,

    /// Plan for a partnered household.
    #[arg(long)]
    partnered: bool,

    /// Partner's gross annual income (partnered households only).
    #[arg(long, value_parser = parse_decimal_arg, default_value = "0")]
    partner_income: Decimal,

    /// Number of children.
    #[arg(long, default_value_t = 0)]
    children: u32,

    /// Override one budget category as `category=amount`; repeatable.
    /// Any override switches the plan to the custom lifestyle.
    #[arg(long = "expense", value_parser = parse_expense_arg)]
    expenses: Vec<(ExpenseCategory, Decimal)>,

    /// Current gross annual income, for a gap comparison.
    #[arg(long, value_parser = parse_decimal_arg)]
    current_income: Option<Decimal>,

    /// Save the plan as a scenario.
    #[arg(long)]
    save: bool,

    /// Name for the saved scenario; generated from the location and
    /// family when omitted.
    #[arg(long, requires = "save")]
    name: Option<String>,

    /// Mark the saved scenario as publicly visible.
    #[arg(long, requires = "save")]
    public: bool,

    /// Owner recorded on the saved scenario.
    #[arg(long, default_value = "local", requires = "save")]
    user: String,
}

#[derive(Debug, Subcommand)]
enum ScenariosCommand {
    /// List saved scenarios.
    List {
        /// Only scenarios owned by this user.
        #[arg(long)]
        user: Option<String>,

        /// Only publicly shared scenarios.
        #[arg(long, conflicts_with = "user")]
        public: bool,
    },

    /// Show one scenario in full.
    Show {
        /// Scenario id, as printed by `scenarios list`.
        id: i64,
    },

    /// Delete a scenario.
    Delete {
        /// Scenario id, as printed by `scenarios list`.
        id: i64,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let store_config = StoreConfig {
        backend: cli.backend,
        connection_string: cli.db,
    };

    match cli.command {
        Command::Taxes(args) => app::run_taxes(&args),
        Command::RequiredIncome(args) => app::run_required_income(&args),
        Command::Plan(args) => {
            let store = app::connect(&store_config).await?;
            app::run_plan(&*store, args).await
        }
        Command::Scenarios { command } => {
            let store = app::connect(&store_config).await?;
            app::run_scenarios(&*store, &command).await
        }
        Command::Locations => {
            let store = app::connect(&store_config).await?;
            app::run_locations(&*store).await
        }
    }
}
