use std::cmp::Ordering;

use chrono::{Datelike, Local};

use super::error::ProjectionError;
use super::projection::project_scenario;
use super::scoring::calculate_qualitative_fit_score;
use super::types::{Asset, Scenario, ScenarioComparison, ScenarioResults, UserQualitativeGoal};

pub fn current_year() -> i32 {
    Local::now().year()
}

/// Projects `scenario` from the current calendar year and scores it.
pub fn compute_scenario_results(
    scenario: &Scenario,
    assets: &[Asset],
    goals: &[UserQualitativeGoal],
) -> Result<ScenarioResults, ProjectionError> {
    compute_scenario_results_from_year(current_year(), scenario, assets, goals)
}

pub fn compute_scenario_results_from_year(
    first_year: i32,
    scenario: &Scenario,
    assets: &[Asset],
    goals: &[UserQualitativeGoal],
) -> Result<ScenarioResults, ProjectionError> {
    let projection = project_scenario(first_year, scenario, assets)?;
    let qualitative = calculate_qualitative_fit_score(scenario, goals);

    Ok(ScenarioResults {
        scenario_id: scenario.id.clone(),
        total_net_outcome: projection.totals.net_financial_outcome,
        totals: projection.totals,
        yearly_projections: projection.yearly,
        qualitative_fit_score: qualitative.score,
        goal_alignments: qualitative.goal_alignments,
        scoring_details: qualitative.details,
    })
}

/// Ranks scenarios by total net outcome, then fit score, then id.
///
/// Fails on the first scenario that cannot be computed.
pub fn compare_scenarios(
    first_year: i32,
    scenarios: &[Scenario],
    assets: &[Asset],
    goals: &[UserQualitativeGoal],
) -> Result<Vec<ScenarioComparison>, ProjectionError> {
    let mut rows = scenarios
        .iter()
        .map(|scenario| {
            let results = compute_scenario_results_from_year(first_year, scenario, assets, goals)?;
            Ok(ScenarioComparison {
                rank: 0,
                scenario_id: scenario.id.clone(),
                name: scenario.name.clone(),
                country: scenario.location.country.clone(),
                total_net_outcome: results.total_net_outcome,
                total_tax: results.totals.total_tax,
                qualitative_fit_score: results.qualitative_fit_score,
            })
        })
        .collect::<Result<Vec<_>, ProjectionError>>()?;

    rows.sort_by(|a, b| {
        b.total_net_outcome
            .partial_cmp(&a.total_net_outcome)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.qualitative_fit_score.cmp(&a.qualitative_fit_score))
            .then_with(|| a.scenario_id.cmp(&b.scenario_id))
    });
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::projection::tests::{sample_asset, sample_scenario};
    use crate::core::types::{GoalWeight, QualitativeAttribute, Sentiment, Significance};

    fn climate_goal() -> UserQualitativeGoal {
        UserQualitativeGoal {
            id: "climate".to_string(),
            concept_id: "weather".to_string(),
            name: "Sunny climate".to_string(),
            weight: GoalWeight::Critical,
        }
    }

    fn sunny_scenario() -> Scenario {
        let mut scenario = sample_scenario();
        scenario.qualitative_attributes = vec![QualitativeAttribute {
            id: "attr-1".to_string(),
            scenario_id: scenario.id.clone(),
            description: "300 days of sun".to_string(),
            sentiment: Sentiment::Positive,
            significance: Significance::Critical,
            mapped_goal_id: Some("climate".to_string()),
        }];
        scenario
    }

    #[test]
    fn results_combine_projection_and_fit_score() {
        let results = compute_scenario_results_from_year(
            2024,
            &sunny_scenario(),
            &[sample_asset()],
            &[climate_goal()],
        )
        .expect("results");

        assert_eq!(results.scenario_id, "scenario-1");
        assert_eq!(results.yearly_projections.len(), 10);
        assert!((results.total_net_outcome - 1_082_300.0).abs() < 1e-6);
        assert_eq!(results.qualitative_fit_score, 100);
        assert!(results.goal_alignments[0].is_aligned);
        assert_eq!(results.scoring_details.mapped_attributes_count, 1);
    }

    #[test]
    fn results_are_identical_across_calls() {
        let scenario = sunny_scenario();
        let assets = [sample_asset()];
        let goals = [climate_goal()];

        let first = compute_scenario_results_from_year(2024, &scenario, &assets, &goals).unwrap();
        let second = compute_scenario_results_from_year(2024, &scenario, &assets, &goals).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn missing_asset_never_yields_partial_results() {
        let results =
            compute_scenario_results_from_year(2024, &sunny_scenario(), &[], &[climate_goal()]);
        assert!(matches!(results, Err(ProjectionError::MissingAsset { .. })));
    }

    #[test]
    fn current_year_entry_point_starts_projection_this_year() {
        let results =
            compute_scenario_results(&sunny_scenario(), &[sample_asset()], &[]).expect("results");
        assert_eq!(results.yearly_projections[0].year, current_year());
        assert_eq!(results.qualitative_fit_score, 50);
    }

    #[test]
    fn results_serialize_with_camel_case_keys() {
        let results =
            compute_scenario_results_from_year(2024, &sunny_scenario(), &[sample_asset()], &[])
                .unwrap();
        let json = serde_json::to_string(&results).expect("serializes");
        assert!(json.contains("\"yearlyProjections\""));
        assert!(json.contains("\"netFinancialOutcome\""));
        assert!(json.contains("\"capitalGainsData\""));
        assert!(json.contains("\"qualitativeFitScore\""));
        assert!(json.contains("\"unmappedAttributesCount\""));
    }

    #[test]
    fn comparison_ranks_by_net_outcome_then_fit() {
        let lisbon = sunny_scenario();
        let mut dubai = sample_scenario();
        dubai.id = "scenario-2".to_string();
        dubai.name = "Dubai".to_string();
        dubai.location.country = "UAE".to_string();
        dubai.tax.capital_gains.long_term_rate = Some(0.0);
        dubai.tax.income_rate = Some(0.0);
        let mut twin = sample_scenario();
        twin.id = "scenario-0".to_string();

        let rows = compare_scenarios(
            2024,
            &[lisbon, dubai, twin],
            &[sample_asset()],
            &[climate_goal()],
        )
        .expect("comparison");

        let order: Vec<&str> = rows.iter().map(|row| row.scenario_id.as_str()).collect();
        assert_eq!(order, vec!["scenario-2", "scenario-1", "scenario-0"]);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].country, "UAE");
        assert!(rows[0].total_tax.abs() < 1e-9);
        assert_eq!(rows[1].qualitative_fit_score, 100);
        assert_eq!(rows[2].qualitative_fit_score, 50);
        assert_eq!(rows[2].rank, 3);
    }

    #[test]
    fn comparison_fails_when_any_scenario_fails() {
        let mut broken = sample_scenario();
        broken.projection_period = None;

        let err = compare_scenarios(2024, &[sample_scenario(), broken], &[sample_asset()], &[])
            .expect_err("one scenario is incomplete");
        assert_eq!(err.code(), "INVALID_SCENARIO");
    }
}
