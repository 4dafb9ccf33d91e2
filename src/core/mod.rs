mod error;
mod projection;
mod results;
mod scoring;
mod types;
mod validation;

pub use error::ProjectionError;
pub use projection::{
    compute_capital_gains_for_year, compute_expenses_for_year, compute_income_for_year,
    compute_taxes_for_year, project_scenario,
};
pub use results::{
    compare_scenarios, compute_scenario_results, compute_scenario_results_from_year, current_year,
};
pub use scoring::{ALIGNMENT_THRESHOLD, NEUTRAL_SCORE, calculate_qualitative_fit_score};
pub use types::{
    AnnualExpense, Asset, AttributeContribution, CapitalGainsData, CapitalGainsRates,
    GoalAlignment, GoalContribution, GoalWeight, IncomeSource, IncomeType, Location,
    OneTimeExpense, PlannedAssetSale, ProjectionTotals, QualitativeAttribute, QualitativeScore,
    Scenario, ScenarioComparison, ScenarioProjection, ScenarioResults, ScenarioYearlyProjection,
    ScoringDetails, Sentiment, Significance, TaxBreakdown, TaxConfig, UserQualitativeGoal,
};
pub use validation::{MAX_PROJECTION_YEARS, validate_assets};
