use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeType {
    Employment,
    RentalProperty,
    Other,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn value(self) -> f64 {
        match self {
            Sentiment::Positive => 1.0,
            Sentiment::Neutral => 0.0,
            Sentiment::Negative => -1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Significance {
    Low,
    Medium,
    High,
    Critical,
}

impl Significance {
    pub fn value(self) -> f64 {
        match self {
            Significance::Low => 0.25,
            Significance::Medium => 0.5,
            Significance::High => 0.75,
            Significance::Critical => 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum GoalWeight {
    Low,
    Medium,
    High,
    Critical,
}

impl GoalWeight {
    /// Numeric weight of a goal on the 0.25 / 0.5 / 0.75 / 1.0 scale.
    ///
    /// This is the only scale the scoring engine understands: a goal's
    /// maximum possible contribution equals its weight, because the best
    /// attribute it can receive is Positive (+1) and Critical (1).
    pub fn value(self) -> f64 {
        match self {
            GoalWeight::Low => 0.25,
            GoalWeight::Medium => 0.5,
            GoalWeight::High => 0.75,
            GoalWeight::Critical => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub cost_basis_per_unit: f64,
    pub acquisition_date: NaiveDate,
    #[serde(default)]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub fmv_per_unit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Capital gains rates in percent. `None` means the rate was never
/// configured, which is distinct from a configured 0%.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGainsRates {
    #[serde(default)]
    pub short_term_rate: Option<f64>,
    #[serde(default)]
    pub long_term_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfig {
    #[serde(default)]
    pub capital_gains: CapitalGainsRates,
    #[serde(default)]
    pub income_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub income_type: IncomeType,
    pub annual_amount: f64,
    pub start_year: i32,
    #[serde(default)]
    pub end_year: Option<i32>,
}

impl IncomeSource {
    pub fn is_active(&self, year: i32) -> bool {
        year >= self.start_year && self.end_year.is_none_or(|end| year <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualExpense {
    pub id: String,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
}

impl AnnualExpense {
    pub fn is_active(&self, year: i32) -> bool {
        year >= self.start_year.unwrap_or(0) && self.end_year.is_none_or(|end| year <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeExpense {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedAssetSale {
    pub id: String,
    pub asset_id: String,
    pub year: i32,
    pub quantity: f64,
    pub sale_price_per_unit: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitativeAttribute {
    pub id: String,
    #[serde(default)]
    pub scenario_id: String,
    pub description: String,
    pub sentiment: Sentiment,
    pub significance: Significance,
    #[serde(default)]
    pub mapped_goal_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQualitativeGoal {
    pub id: String,
    #[serde(default)]
    pub concept_id: String,
    pub name: String,
    pub weight: GoalWeight,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub projection_period: Option<u32>,
    #[serde(default)]
    pub residency_start_date: Option<NaiveDate>,
    pub location: Location,
    #[serde(default)]
    pub tax: TaxConfig,
    #[serde(default)]
    pub income_sources: Vec<IncomeSource>,
    #[serde(default)]
    pub annual_expenses: Vec<AnnualExpense>,
    #[serde(default)]
    pub one_time_expenses: Vec<OneTimeExpense>,
    #[serde(default)]
    pub planned_asset_sales: Vec<PlannedAssetSale>,
    #[serde(default)]
    pub qualitative_attributes: Vec<QualitativeAttribute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGainsData {
    pub short_term_gains: f64,
    pub long_term_gains: f64,
    pub total_gains: f64,
    pub taxable_gains: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub capital_gains_tax: f64,
    pub income_tax: f64,
    pub total_tax: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioYearlyProjection {
    pub year: i32,
    pub capital_gains_data: CapitalGainsData,
    pub tax_breakdown: TaxBreakdown,
    pub income: f64,
    pub expenses: f64,
    pub net_financial_outcome: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionTotals {
    pub income: f64,
    pub expenses: f64,
    pub total_gains: f64,
    pub total_tax: f64,
    pub net_financial_outcome: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub yearly: Vec<ScenarioYearlyProjection>,
    pub totals: ProjectionTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeContribution {
    pub attribute_id: String,
    pub contribution: f64,
    pub max_possible_percent: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalAlignment {
    pub goal_id: String,
    pub goal_name: String,
    pub is_aligned: bool,
    pub alignment_score: i64,
    pub contributing_attributes: Vec<AttributeContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalContribution {
    pub goal_id: String,
    pub contribution: f64,
    pub max_possible_contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringDetails {
    pub mapped_attributes_count: usize,
    pub unmapped_attributes_count: usize,
    pub goal_contributions: Vec<GoalContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitativeScore {
    pub score: i64,
    pub details: ScoringDetails,
    pub goal_alignments: Vec<GoalAlignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResults {
    pub scenario_id: String,
    pub yearly_projections: Vec<ScenarioYearlyProjection>,
    pub totals: ProjectionTotals,
    pub total_net_outcome: f64,
    pub qualitative_fit_score: i64,
    pub goal_alignments: Vec<GoalAlignment>,
    pub scoring_details: ScoringDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub rank: usize,
    pub scenario_id: String,
    pub name: String,
    pub country: String,
    pub total_net_outcome: f64,
    pub total_tax: f64,
    pub qualitative_fit_score: i64,
}
