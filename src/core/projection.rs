use tracing::debug;

use super::error::ProjectionError;
use super::types::{
    Asset, CapitalGainsData, ProjectionTotals, Scenario, ScenarioProjection,
    ScenarioYearlyProjection, TaxBreakdown,
};

/// Gains realised by the planned sales of `year`.
///
/// Holding periods are not modelled: every gain is reported as long-term
/// and short-term gains are always zero. Losses reduce `total_gains` but
/// `taxable_gains` never drops below zero, and nothing is carried forward.
pub fn compute_capital_gains_for_year(
    year: i32,
    scenario: &Scenario,
    assets: &[Asset],
) -> Result<CapitalGainsData, ProjectionError> {
    let mut total_gains = 0.0;
    for sale in scenario
        .planned_asset_sales
        .iter()
        .filter(|sale| sale.year == year)
    {
        let asset = assets
            .iter()
            .find(|asset| asset.id == sale.asset_id)
            .ok_or_else(|| ProjectionError::MissingAsset {
                sale_id: sale.id.clone(),
                asset_id: sale.asset_id.clone(),
            })?;
        let proceeds = sale.sale_price_per_unit * sale.quantity;
        let basis = asset.cost_basis_per_unit * sale.quantity;
        total_gains += proceeds - basis;
    }

    Ok(CapitalGainsData {
        short_term_gains: 0.0,
        long_term_gains: total_gains,
        total_gains,
        taxable_gains: total_gains.max(0.0),
    })
}

pub fn compute_income_for_year(year: i32, scenario: &Scenario) -> f64 {
    scenario
        .income_sources
        .iter()
        .filter(|source| source.is_active(year))
        .map(|source| source.annual_amount)
        .sum()
}

pub fn compute_expenses_for_year(year: i32, scenario: &Scenario) -> f64 {
    let recurring: f64 = scenario
        .annual_expenses
        .iter()
        .filter(|expense| expense.is_active(year))
        .map(|expense| expense.amount)
        .sum();
    let one_time: f64 = scenario
        .one_time_expenses
        .iter()
        .filter(|expense| expense.year == year)
        .map(|expense| expense.amount)
        .sum();
    recurring + one_time
}

/// Flat-rate taxes for one year. Rates are percentages; an unset income
/// rate taxes nothing, an unset long-term rate is an error. Figures are
/// left unrounded.
pub fn compute_taxes_for_year(
    capital_gains: &CapitalGainsData,
    income: f64,
    scenario: &Scenario,
) -> Result<TaxBreakdown, ProjectionError> {
    let long_term_rate = scenario.tax.capital_gains.long_term_rate.ok_or_else(|| {
        ProjectionError::MissingTaxRates {
            scenario_id: scenario.id.clone(),
        }
    })? / 100.0;
    let income_rate = scenario.tax.income_rate.unwrap_or(0.0) / 100.0;

    let capital_gains_tax = capital_gains.taxable_gains * long_term_rate;
    let income_tax = income * income_rate;
    Ok(TaxBreakdown {
        capital_gains_tax,
        income_tax,
        total_tax: capital_gains_tax + income_tax,
    })
}

/// Returns the last projected year for a scenario starting in `first_year`.
fn validate_scenario(first_year: i32, scenario: &Scenario) -> Result<i32, ProjectionError> {
    let invalid = |reason: &str| ProjectionError::InvalidScenario {
        scenario_id: scenario.id.clone(),
        reason: reason.to_string(),
    };

    let period = match scenario.projection_period {
        Some(period) if period >= 1 => period,
        Some(_) => return Err(invalid("projection period must be at least one year")),
        None => return Err(invalid("projection period is required")),
    };
    if scenario.residency_start_date.is_none() {
        return Err(invalid("residency start date is required"));
    }
    i32::try_from(period - 1)
        .ok()
        .and_then(|span| first_year.checked_add(span))
        .ok_or_else(|| invalid("projection period extends past the last representable year"))
}

fn project_year(
    year: i32,
    scenario: &Scenario,
    assets: &[Asset],
) -> Result<ScenarioYearlyProjection, ProjectionError> {
    let capital_gains_data = compute_capital_gains_for_year(year, scenario, assets)?;
    let income = compute_income_for_year(year, scenario);
    let expenses = compute_expenses_for_year(year, scenario);
    let tax_breakdown = compute_taxes_for_year(&capital_gains_data, income, scenario)?;
    let net_financial_outcome =
        income + capital_gains_data.total_gains - tax_breakdown.total_tax - expenses;

    Ok(ScenarioYearlyProjection {
        year,
        capital_gains_data,
        tax_breakdown,
        income,
        expenses,
        net_financial_outcome,
    })
}

/// Projects `scenario` over `first_year ..= first_year + period - 1`.
///
/// Any failing year aborts the whole projection.
pub fn project_scenario(
    first_year: i32,
    scenario: &Scenario,
    assets: &[Asset],
) -> Result<ScenarioProjection, ProjectionError> {
    let last_year = validate_scenario(first_year, scenario)?;

    let mut yearly = Vec::new();
    let mut totals = ProjectionTotals::default();
    for year in first_year..=last_year {
        let row = project_year(year, scenario, assets)?;
        totals.income += row.income;
        totals.expenses += row.expenses;
        totals.total_gains += row.capital_gains_data.total_gains;
        totals.total_tax += row.tax_breakdown.total_tax;
        totals.net_financial_outcome += row.net_financial_outcome;
        yearly.push(row);
    }

    debug!(
        scenario_id = %scenario.id,
        first_year,
        last_year,
        net = totals.net_financial_outcome,
        "projected scenario"
    );
    Ok(ScenarioProjection { yearly, totals })
}
