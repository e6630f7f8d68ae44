//! Handles and small value types shared across the engine.

use std::fmt;

/// Handle to a variable owned by a planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableId(pub usize);

impl VariableId {
    /// Index of the variable in its planner's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Handle to a constraint owned by a planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintId(pub usize);

impl ConstraintId {
    /// Index of the constraint in its planner's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Which way information currently flows through a constraint.
///
/// Binary constraints use all three states. Unary constraints only use
/// `Forward` (satisfied) and `None` (unsatisfied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Not satisfied
    #[default]
    None,
    /// v1 drives v2
    Forward,
    /// v2 drives v1
    Backward,
}
