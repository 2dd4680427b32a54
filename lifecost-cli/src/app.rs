//! Command handlers behind the `lifecost` binary.
//!
//! Each subcommand maps onto one `run_*` function. The pure calculation
//! commands never touch the database; everything else goes through a
//! [`ScenarioStore`] opened by [`connect`].

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use lifecost_core::calculations::{
    IncomePlan, IncomePlanner, PayrollTaxConfig, RequiredIncomeSolver, SolverConfig, TaxCalculator,
    TaxInput,
};
use lifecost_core::db::{ScenarioStore, StoreConfig, StoreError, StoreRegistry};
use lifecost_core::format::{format_currency, format_rate};
use lifecost_core::models::{
    combined_annual_income, combined_monthly_income, default_scenario_name, ExpenseCategory,
    FamilyStatus, IncomeComparison, Location, Relationship, Scenario,
};
use lifecost_core::tables::default_preset;
use lifecost_core::wizard::{WizardAction, WizardState, LAST_STEP};
use lifecost_db_sqlite::SqliteStoreFactory;

use crate::args;
use crate::{PlanArgs, RequiredIncomeArgs, ScenariosCommand, TaxesArgs};

/// Registry with every backend this binary links against.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// Opens the store described by `config`, running migrations and seeds.
pub async fn connect(config: &StoreConfig) -> Result<Box<dyn ScenarioStore>> {
    debug!("connecting to {} backend", config.backend);
    let registry = build_registry();
    let store = registry.create(config).await.with_context(|| {
        format!(
            "Failed to open the {} store at '{}'",
            config.backend, config.connection_string
        )
    })?;
    Ok(store)
}

// ─── taxes ───────────────────────────────────────────────────────────────────

pub fn run_taxes(args: &TaxesArgs) -> Result<()> {
    let calculator = TaxCalculator::new(PayrollTaxConfig::default());
    let breakdown = calculator.estimate(&TaxInput {
        annual_income: args.income,
        state: args.state.clone(),
        city: args.city.clone(),
        married: args.married,
        partner_income: args.partner_income,
    })?;

    let household = if args.married { "married" } else { "single" };
    let place = match &args.city {
        Some(city) => format!("{}, {}", city, args.state),
        None => args.state.clone(),
    };
    println!(
        "Tax estimate for {} gross in {place} ({household}):",
        format_currency(args.income)
    );
    println!();
    println!("  Federal income tax  {:>12}", format_currency(breakdown.federal_tax));
    println!("  State income tax    {:>12}", format_currency(breakdown.state_tax));
    println!("  City income tax     {:>12}", format_currency(breakdown.city_tax));
    println!("  Social Security     {:>12}", format_currency(breakdown.social_security));
    println!("  Medicare            {:>12}", format_currency(breakdown.medicare));
    println!("  Total tax           {:>12}", format_currency(breakdown.total_tax));
    println!();
    println!(
        "  Take-home pay       {:>12}  ({}/month)",
        format_currency(breakdown.take_home_pay),
        format_currency(breakdown.monthly_take_home)
    );
    println!("  Effective rate      {:>12}", format_rate(breakdown.effective_rate));
    println!("  Marginal rate       {:>12}", format_rate(breakdown.marginal_rate));

    Ok(())
}

// ─── required-income ─────────────────────────────────────────────────────────

pub fn run_required_income(args: &RequiredIncomeArgs) -> Result<()> {
    let calculator = TaxCalculator::new(PayrollTaxConfig::default());
    let solver = RequiredIncomeSolver::new(calculator.clone(), SolverConfig::default());

    let outcome = solver.solve(args.target, &args.state, args.married, args.partner_income)?;
    let breakdown = calculator.estimate(&TaxInput {
        annual_income: outcome.required_annual_income,
        state: args.state.clone(),
        city: None,
        married: args.married,
        partner_income: args.partner_income,
    })?;

    let household = if args.married { "married" } else { "single" };
    println!(
        "To take home {} per month in {} ({household}):",
        format_currency(args.target),
        args.state
    );
    println!();
    println!(
        "  Required annual income   {:>12}",
        format_currency(outcome.required_annual_income)
    );
    println!(
        "  Required monthly income  {:>12}",
        format_currency(outcome.required_annual_income / Decimal::from(12))
    );
    println!(
        "  Monthly take-home there  {:>12}",
        format_currency(breakdown.monthly_take_home)
    );
    println!("  Solver iterations        {:>12}", outcome.iterations);
    if !outcome.converged {
        println!();
        println!("  Note: the search did not come within tolerance; the best approximation is shown.");
    }

    Ok(())
}

// ─── plan ────────────────────────────────────────────────────────────────────

pub async fn run_plan(store: &dyn ScenarioStore, args: PlanArgs) -> Result<()> {
    let location =
        resolve_location(store, args.location.as_deref(), args.cost_multiplier).await?;

    let mut state = WizardState::default().apply(WizardAction::SetLifestyle(args.lifestyle));
    if !args.expenses.is_empty() {
        let budget: BTreeMap<ExpenseCategory, Decimal> = args.expenses.iter().copied().collect();
        state = state.apply(WizardAction::SetCustomExpenses(budget));
    }
    state = state
        .apply(WizardAction::SetFamily(FamilyStatus {
            relationship: if args.partnered {
                Relationship::Partnered
            } else {
                Relationship::Single
            },
            num_children: args.children,
            partner_income: args.partner_income,
        }))
        .apply(WizardAction::SetLocation(location))
        .apply(WizardAction::SetStep(LAST_STEP));
    state.validate()?;

    let planner = IncomePlanner::new(RequiredIncomeSolver::new(
        TaxCalculator::new(PayrollTaxConfig::default()),
        SolverConfig::default(),
    ));
    let plan = planner.plan(
        state.lifestyle,
        state.custom_expenses.as_ref(),
        &state.family,
        &state.location,
    )?;

    print_plan(&state, &plan);

    if let Some(current) = args.current_income {
        print_comparison(&IncomeComparison::compare(plan.yearly_income, current), current);
    }

    if args.save {
        let scenario = save_plan(store, state, &plan, &args).await?;
        println!();
        println!("Saved scenario #{}: {}", scenario.id, scenario.name);
    }

    Ok(())
}

/// Resolves the `--location` argument.
///
/// Without an explicit multiplier a stored preset wins, so curated
/// cost-of-living data is used when available. An explicit multiplier
/// always makes the location custom. No argument means the default
/// preset.
async fn resolve_location(
    store: &dyn ScenarioStore,
    argument: Option<&str>,
    cost_multiplier: Option<Decimal>,
) -> Result<Location> {
    let Some(argument) = argument else {
        return Ok(default_preset().to_location());
    };

    let custom = args::parse_location_arg(argument, cost_multiplier.unwrap_or(Decimal::ONE))?;
    if cost_multiplier.is_some() {
        return Ok(custom);
    }

    match store.get_location_preset(&custom.city, &custom.state).await {
        Ok(preset) => Ok(preset.to_location()),
        Err(StoreError::NotFound) => {
            debug!(city = %custom.city, state = %custom.state, "no stored preset, using custom location");
            Ok(custom)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_plan(state: &WizardState, plan: &IncomePlan) {
    let location = &state.location;
    let family = &state.family;

    println!(
        "Lifestyle plan: {} in {}, {} (cost of living x{})",
        state.lifestyle.as_str(),
        location.city,
        location.state,
        location.cost_multiplier
    );
    let partner = match family.relationship {
        Relationship::Partnered => format!(
            "partnered, partner earns {}/yr",
            format_currency(family.partner_income)
        ),
        Relationship::Single => "single".to_string(),
    };
    println!("Household: {partner}, {} children", family.num_children);

    println!();
    println!("Monthly budget:");
    for (category, amount) in &plan.adjusted_outflows {
        println!("  {:<16}{:>10}", category.as_str(), format_currency(*amount));
    }
    if plan.children_expenses > Decimal::ZERO {
        println!(
            "  {:<16}{:>10}",
            "children",
            format_currency(plan.children_expenses)
        );
    }
    println!("  {:<16}{:>10}", "total", format_currency(plan.monthly_expenses));

    println!();
    println!(
        "Required gross income: {}/month ({}/year)",
        format_currency(plan.monthly_income),
        format_currency(plan.yearly_income)
    );
    if !plan.converged {
        println!("Note: the income search did not converge; the figure shown is the best approximation.");
    }
    if family.is_partnered() && family.partner_income > Decimal::ZERO {
        println!(
            "Combined household income: {}/year ({}/month)",
            format_currency(combined_annual_income(plan.yearly_income, family.partner_income)),
            format_currency(combined_monthly_income(plan.yearly_income, family.partner_income))
        );
    }
}

fn print_comparison(comparison: &IncomeComparison, current_income: Decimal) {
    println!();
    if comparison.meets_target {
        println!(
            "Your current income of {} already covers this lifestyle (margin {}).",
            format_currency(current_income),
            format_currency(-comparison.gap)
        );
    } else {
        println!(
            "You would need {} more than your current {} (a {} raise).",
            format_currency(comparison.gap),
            format_currency(current_income),
            format_rate(comparison.percent_increase / Decimal::ONE_HUNDRED)
        );
        if comparison.steep_increase {
            println!("That is a steep jump; consider a cheaper location or a leaner budget.");
        }
    }
}

async fn save_plan(
    store: &dyn ScenarioStore,
    state: WizardState,
    plan: &IncomePlan,
    args: &PlanArgs,
) -> Result<Scenario> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => default_scenario_name(&state.location, &state.family, Utc::now().date_naive()),
    };

    let draft = state.into_scenario(name, args.user.clone(), args.user.clone(), args.public);
    let mut scenario = store
        .create_scenario(draft)
        .await
        .context("Failed to save the scenario")?;

    scenario.apply_plan(plan);
    store
        .update_scenario(&scenario)
        .await
        .context("Failed to store the computed plan")?;

    Ok(scenario)
}

// ─── scenarios ───────────────────────────────────────────────────────────────

pub async fn run_scenarios(store: &dyn ScenarioStore, command: &ScenariosCommand) -> Result<()> {
    match command {
        ScenariosCommand::List { user, public } => {
            let scenarios = if *public {
                store.list_public_scenarios().await
            } else {
                store.list_scenarios(user.as_deref()).await
            }
            .context("Failed to list scenarios")?;

            if scenarios.is_empty() {
                println!("No saved scenarios.");
                return Ok(());
            }
            for scenario in &scenarios {
                println!("{}", scenario_summary(scenario));
            }
        }
        ScenariosCommand::Show { id } => {
            let scenario = store
                .get_scenario(*id)
                .await
                .with_context(|| format!("Failed to load scenario {id}"))?;
            print_scenario(&scenario);
        }
        ScenariosCommand::Delete { id } => {
            store
                .delete_scenario(*id)
                .await
                .with_context(|| format!("Failed to delete scenario {id}"))?;
            println!("Deleted scenario #{id}.");
        }
    }

    Ok(())
}

/// One listing line: id, name, the choices behind the plan, and the
/// computed requirement when the scenario has been priced.
fn scenario_summary(scenario: &Scenario) -> String {
    let mut line = format!(
        "#{:<4} {}  [{}, {}, {}]",
        scenario.id,
        scenario.name,
        scenario.lifestyle.as_str(),
        scenario.location.city,
        scenario.location.state
    );
    if let Some(yearly) = scenario.yearly_income {
        line.push_str(&format!("  requires {}/yr", format_currency(yearly)));
    }
    if scenario.is_public {
        line.push_str("  (public)");
    }
    line
}

fn print_scenario(scenario: &Scenario) {
    println!("Scenario #{}: {}", scenario.id, scenario.name);
    println!("  Owner       {} ({})", scenario.user_name, scenario.user_id);
    println!(
        "  Visibility  {}",
        if scenario.is_public { "public" } else { "private" }
    );
    println!("  Lifestyle   {}", scenario.lifestyle.as_str());
    println!(
        "  Location    {}, {} (x{})",
        scenario.location.city, scenario.location.state, scenario.location.cost_multiplier
    );
    println!(
        "  Family      {}, {} children",
        scenario.family.relationship.as_str(),
        scenario.family.num_children
    );
    if scenario.family.partner_income > Decimal::ZERO {
        println!(
            "  Partner     {}/yr",
            format_currency(scenario.family.partner_income)
        );
    }

    if let Some(custom) = &scenario.custom_expenses {
        println!();
        println!("  Custom budget:");
        for (category, amount) in custom {
            println!("    {:<16}{:>10}", category.as_str(), format_currency(*amount));
        }
    }

    if !scenario.adjusted_outflows.is_empty() {
        println!();
        println!("  Adjusted monthly outflows:");
        for (category, amount) in &scenario.adjusted_outflows {
            println!("    {:<16}{:>10}", category.as_str(), format_currency(*amount));
        }
    }

    if let (Some(monthly), Some(yearly)) = (scenario.monthly_income, scenario.yearly_income) {
        println!();
        println!(
            "  Required income: {}/month ({}/year)",
            format_currency(monthly),
            format_currency(yearly)
        );
    }
    if let Some(expenses) = scenario.monthly_expenses {
        println!("  Monthly spending: {}", format_currency(expenses));
    }

    println!();
    println!(
        "  Created {}  Updated {}",
        scenario.created_at.format("%Y-%m-%d %H:%M"),
        scenario.updated_at.format("%Y-%m-%d %H:%M")
    );
}

// ─── locations ───────────────────────────────────────────────────────────────

pub async fn run_locations(store: &dyn ScenarioStore) -> Result<()> {
    let presets = store
        .list_location_presets()
        .await
        .context("Failed to list location presets")?;

    if presets.is_empty() {
        println!("No location presets stored.");
        return Ok(());
    }

    println!("Known locations (cost of living vs national average):");
    for preset in &presets {
        println!("  {:<20} {:<4} x{}", preset.name, preset.state, preset.cost_multiplier);
    }

    Ok(())
}
