use serde_json::{Value, json};
use thiserror::Error;

/// Failures that abort a scenario computation. None of them produce a
/// partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("scenario {scenario_id} is incomplete: {reason}")]
    InvalidScenario { scenario_id: String, reason: String },

    #[error("planned sale {sale_id} references unknown asset {asset_id}")]
    MissingAsset { sale_id: String, asset_id: String },

    #[error("scenario {scenario_id} has no long-term capital gains rate configured")]
    MissingTaxRates { scenario_id: String },
}

impl ProjectionError {
    pub fn code(&self) -> &'static str {
        match self {
            ProjectionError::InvalidScenario { .. } => "INVALID_SCENARIO",
            ProjectionError::MissingAsset { .. } => "MISSING_ASSET",
            ProjectionError::MissingTaxRates { .. } => "MISSING_TAX_RATES",
        }
    }

    pub fn details(&self) -> Value {
        match self {
            ProjectionError::InvalidScenario {
                scenario_id,
                reason,
            } => json!({ "scenarioId": scenario_id, "reason": reason }),
            ProjectionError::MissingAsset { sale_id, asset_id } => {
                json!({ "saleId": sale_id, "assetId": asset_id })
            }
            ProjectionError::MissingTaxRates { scenario_id } => {
                json!({ "scenarioId": scenario_id })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_asset_exposes_code_and_ids() {
        let err = ProjectionError::MissingAsset {
            sale_id: "sale-1".to_string(),
            asset_id: "asset-9".to_string(),
        };
        assert_eq!(err.code(), "MISSING_ASSET");
        assert_eq!(err.details()["saleId"], "sale-1");
        assert_eq!(err.details()["assetId"], "asset-9");
        assert!(err.to_string().contains("asset-9"));
    }

    #[test]
    fn invalid_scenario_message_includes_reason() {
        let err = ProjectionError::InvalidScenario {
            scenario_id: "pt".to_string(),
            reason: "projection period is required".to_string(),
        };
        assert_eq!(err.code(), "INVALID_SCENARIO");
        assert_eq!(
            err.to_string(),
            "scenario pt is incomplete: projection period is required"
        );
    }
}
