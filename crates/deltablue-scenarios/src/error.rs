use deltablue_core::PlannerError;
use thiserror::Error;

use crate::config::ConfigError;

/// Scenario failures. A mismatch means the planner computed a wrong value.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Chain test failed at step {step}: expected {expected}, found {found}")]
    ChainMismatch { step: usize, expected: f64, found: f64 },

    #[error(
        "Projection test failed ({stage}) at index {index}: expected {expected}, found {found}"
    )]
    ProjectionMismatch {
        stage: &'static str,
        index: usize,
        expected: f64,
        found: f64,
    },

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
