//! Replayable evaluation plans.

use deltablue_core::ConstraintId;

use crate::planner::Planner;

/// An ordered list of constraints whose inputs always precede their outputs.
///
/// Executing a plan recomputes every downstream variable without re-running
/// the incremental solver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    constraints: Vec<ConstraintId>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, c: ConstraintId) {
        self.constraints.push(c);
    }

    /// Execute each constraint in order against `planner`'s variables.
    pub fn execute(&self, planner: &mut Planner) {
        for &c in &self.constraints {
            planner.execute_constraint(c);
        }
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    pub fn iter(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        self.constraints.iter().copied()
    }
}
