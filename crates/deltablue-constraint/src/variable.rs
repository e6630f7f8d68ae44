//! Constrained variables.

use deltablue_core::{ConstraintId, Strength};
use smallvec::SmallVec;

/// A cell of mutable state participating in constraints.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    pub(crate) value: f64,
    /// Strength at which this variable is currently being driven
    pub(crate) walk_strength: Strength,
    /// True when nothing upstream changes, so the value holds across plans
    pub(crate) stay: bool,
    /// The constraint currently computing this variable
    pub(crate) determined_by: Option<ConstraintId>,
    /// Tag of the last pass that visited this variable
    pub(crate) mark: u64,
    pub(crate) constraints: SmallVec<[ConstraintId; 4]>,
}

impl Variable {
    /// Create a new variable.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            walk_strength: Strength::Weakest,
            stay: true,
            determined_by: None,
            mark: 0,
            constraints: SmallVec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn walk_strength(&self) -> Strength {
        self.walk_strength
    }

    pub fn stay(&self) -> bool {
        self.stay
    }

    pub fn determined_by(&self) -> Option<ConstraintId> {
        self.determined_by
    }

    pub fn mark(&self) -> u64 {
        self.mark
    }

    /// Constraints touching this variable.
    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    /// Attach a constraint. Duplicates are not filtered.
    pub(crate) fn add_constraint(&mut self, c: ConstraintId) {
        self.constraints.push(c);
    }

    /// Detach a constraint, forgetting it as the determiner if it was one.
    pub(crate) fn remove_constraint(&mut self, c: ConstraintId) {
        self.constraints.retain(|existing| *existing != c);
        if self.determined_by == Some(c) {
            self.determined_by = None;
        }
    }
}
