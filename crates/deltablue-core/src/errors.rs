//! Error and diagnostic types for the DeltaBlue engine.

use crate::types::{ConstraintId, VariableId};
use thiserror::Error;

/// Errors returned by the planner's construction and mutation API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("Unknown variable: {id}")]
    UnknownVariable { id: VariableId },

    #[error("Unknown constraint: {id}")]
    UnknownConstraint { id: ConstraintId },
}

/// Non-fatal conditions observed while satisfying constraints.
///
/// Both are expected during normal operation. The planner records them and
/// keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("Could not satisfy a required constraint: {constraint}")]
    RequiredUnsatisfiable { constraint: ConstraintId },

    #[error("Cycle encountered while propagating {constraint}")]
    CycleDetected { constraint: ConstraintId },
}

impl Diagnostic {
    /// The constraint the diagnostic refers to.
    pub fn constraint(&self) -> ConstraintId {
        match self {
            Diagnostic::RequiredUnsatisfiable { constraint }
            | Diagnostic::CycleDetected { constraint } => *constraint,
        }
    }
}
