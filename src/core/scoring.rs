use super::types::{
    AttributeContribution, GoalAlignment, GoalContribution, QualitativeAttribute,
    QualitativeScore, Scenario, ScoringDetails, UserQualitativeGoal,
};

/// Score returned when no goal has anything mapped to it.
pub const NEUTRAL_SCORE: i64 = 50;

/// Minimum alignment score for a goal to count as aligned.
pub const ALIGNMENT_THRESHOLD: i64 = 50;

/// Rounds half-way values toward positive infinity, so `-12.5` becomes `-12`.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn to_percent_score(value: f64) -> i64 {
    round_half_up(value.clamp(0.0, 100.0))
}

fn is_mapped_to(attribute: &QualitativeAttribute, goal: &UserQualitativeGoal) -> bool {
    attribute.mapped_goal_id.as_deref() == Some(goal.id.as_str())
}

fn count_mapped(attributes: &[QualitativeAttribute], goals: &[UserQualitativeGoal]) -> usize {
    attributes
        .iter()
        .filter(|attribute| goals.iter().any(|goal| is_mapped_to(attribute, goal)))
        .count()
}

/// Signed share of each contribution in the goal's total absolute pull.
fn apportion(contributions: &[(&QualitativeAttribute, f64)]) -> Vec<AttributeContribution> {
    let sum_of_absolute: f64 = contributions.iter().map(|(_, c)| c.abs()).sum();
    contributions
        .iter()
        .map(|(attribute, contribution)| AttributeContribution {
            attribute_id: attribute.id.clone(),
            contribution: *contribution,
            max_possible_percent: if sum_of_absolute > 0.0 {
                round_half_up(contribution / sum_of_absolute * 100.0)
            } else {
                0
            },
        })
        .collect()
}

/// Scores how well a scenario's qualitative attributes serve the user's goals.
///
/// Each mapped attribute contributes `sentiment * significance * weight` to its
/// goal. The summed contributions, which range over `[-max, +max]`, are mapped
/// linearly onto 0..=100 so that no net contribution lands on 50. Goals without
/// mapped attributes are listed as unaligned but do not move the score.
pub fn calculate_qualitative_fit_score(
    scenario: &Scenario,
    goals: &[UserQualitativeGoal],
) -> QualitativeScore {
    let attributes = &scenario.qualitative_attributes;
    let mut total_weighted_contribution = 0.0;
    let mut sum_of_max_contributions = 0.0;
    let mut goal_contributions = Vec::new();
    let mut goal_alignments = Vec::with_capacity(goals.len());

    for goal in goals {
        let weight = goal.weight.value();
        let contributions: Vec<(&QualitativeAttribute, f64)> = attributes
            .iter()
            .filter(|attribute| is_mapped_to(attribute, goal))
            .map(|attribute| {
                let contribution =
                    attribute.sentiment.value() * attribute.significance.value() * weight;
                (attribute, contribution)
            })
            .collect();

        if contributions.is_empty() {
            goal_alignments.push(GoalAlignment {
                goal_id: goal.id.clone(),
                goal_name: goal.name.clone(),
                is_aligned: false,
                alignment_score: 0,
                contributing_attributes: Vec::new(),
            });
            continue;
        }

        let goal_contribution: f64 = contributions.iter().map(|(_, c)| c).sum();
        let max_possible_contribution = weight;
        let alignment_score =
            to_percent_score(goal_contribution / max_possible_contribution * 100.0);

        total_weighted_contribution += goal_contribution;
        sum_of_max_contributions += max_possible_contribution;
        goal_contributions.push(GoalContribution {
            goal_id: goal.id.clone(),
            contribution: goal_contribution,
            max_possible_contribution,
        });
        goal_alignments.push(GoalAlignment {
            goal_id: goal.id.clone(),
            goal_name: goal.name.clone(),
            is_aligned: alignment_score >= ALIGNMENT_THRESHOLD,
            alignment_score,
            contributing_attributes: apportion(&contributions),
        });
    }

    let score = if sum_of_max_contributions == 0.0 {
        NEUTRAL_SCORE
    } else {
        to_percent_score(
            (total_weighted_contribution + sum_of_max_contributions)
                / (2.0 * sum_of_max_contributions)
                * 100.0,
        )
    };

    let mapped_attributes_count = count_mapped(attributes, goals);
    QualitativeScore {
        score,
        details: ScoringDetails {
            mapped_attributes_count,
            unmapped_attributes_count: attributes.len() - mapped_attributes_count,
            goal_contributions,
        },
        goal_alignments,
    }
}
