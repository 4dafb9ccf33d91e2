use super::types::{Asset, Scenario};

/// Longest projection accepted from outside callers.
pub const MAX_PROJECTION_YEARS: u32 = 100;

fn check_rate(name: &str, rate: Option<f64>) -> Result<(), String> {
    match rate {
        Some(rate) if !(0.0..=100.0).contains(&rate) => {
            Err(format!("{name} must be between 0 and 100"))
        }
        _ => Ok(()),
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{name} must be >= 0"));
    }
    Ok(())
}

fn check_window(name: &str, start_year: Option<i32>, end_year: Option<i32>) -> Result<(), String> {
    if let (Some(start), Some(end)) = (start_year, end_year) {
        if end < start {
            return Err(format!("{name}.endYear must be >= startYear"));
        }
    }
    Ok(())
}

pub fn validate_assets(assets: &[Asset]) -> Result<(), String> {
    for (idx, asset) in assets.iter().enumerate() {
        check_non_negative(&format!("assets[{idx}].quantity"), asset.quantity)?;
        check_non_negative(
            &format!("assets[{idx}].costBasisPerUnit"),
            asset.cost_basis_per_unit,
        )?;
    }
    Ok(())
}

impl Scenario {
    /// Field-level checks the editing UI normally enforces before a scenario
    /// reaches the engine. Completeness (period, start date, long-term rate)
    /// is left to the engine so callers get its typed errors.
    pub fn validate_fields(&self) -> Result<(), String> {
        if self
            .projection_period
            .is_some_and(|period| period > MAX_PROJECTION_YEARS)
        {
            return Err(format!("projectionPeriod must be <= {MAX_PROJECTION_YEARS}"));
        }

        let tax = &self.tax;
        check_rate(
            "tax.capitalGains.shortTermRate",
            tax.capital_gains.short_term_rate,
        )?;
        check_rate(
            "tax.capitalGains.longTermRate",
            tax.capital_gains.long_term_rate,
        )?;
        check_rate("tax.incomeRate", tax.income_rate)?;

        for (idx, source) in self.income_sources.iter().enumerate() {
            let name = format!("incomeSources[{idx}]");
            check_non_negative(&format!("{name}.annualAmount"), source.annual_amount)?;
            check_window(&name, Some(source.start_year), source.end_year)?;
        }
        for (idx, expense) in self.annual_expenses.iter().enumerate() {
            let name = format!("annualExpenses[{idx}]");
            check_non_negative(&format!("{name}.amount"), expense.amount)?;
            check_window(&name, expense.start_year, expense.end_year)?;
        }
        for (idx, expense) in self.one_time_expenses.iter().enumerate() {
            check_non_negative(&format!("oneTimeExpenses[{idx}].amount"), expense.amount)?;
        }
        for (idx, sale) in self.planned_asset_sales.iter().enumerate() {
            let name = format!("plannedAssetSales[{idx}]");
            check_non_negative(&format!("{name}.quantity"), sale.quantity)?;
            check_non_negative(&format!("{name}.salePricePerUnit"), sale.sale_price_per_unit)?;
        }
        Ok(())
    }
}
