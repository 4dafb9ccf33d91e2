use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Asset, Scenario, UserQualitativeGoal, validate_assets};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("unable to read plan file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid plan JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("plan has no scenario with id {0}")]
    UnknownScenario(String),

    #[error("invalid plan: {0}")]
    Invalid(String),
}

/// Snapshot of everything the planner stores: the global asset list, the
/// user's goals, and every candidate scenario.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Plan {
    pub assets: Vec<Asset>,
    pub goals: Vec<UserQualitativeGoal>,
    pub scenarios: Vec<Scenario>,
}

impl Plan {
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, PlanError> {
        let json = fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn scenario(&self, id: &str) -> Result<&Scenario, PlanError> {
        self.scenarios
            .iter()
            .find(|scenario| scenario.id == id)
            .ok_or_else(|| PlanError::UnknownScenario(id.to_string()))
    }

    /// Applies the same field checks the HTTP surface runs on every request.
    pub fn validate(&self) -> Result<(), PlanError> {
        validate_assets(&self.assets).map_err(PlanError::Invalid)?;
        for scenario in &self.scenarios {
            scenario
                .validate_fields()
                .map_err(|msg| PlanError::Invalid(format!("scenario {}: {msg}", scenario.id)))?;
        }
        Ok(())
    }
}
