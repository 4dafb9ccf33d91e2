use thiserror::Error;

use crate::config::ConfigError;
use crate::core::ProjectionError;
use crate::plan::PlanError;
use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("plan error: {0}")]
    Plan(#[from] PlanError),

    #[error("[{code}] {0}", code = .0.code())]
    Projection(#[from] ProjectionError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
