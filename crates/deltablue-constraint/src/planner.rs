//! The incremental planner.
//!
//! The planner owns a graph of variables and constraints. Adding a constraint
//! satisfies it incrementally, bumping weaker constraints out of the way;
//! removing one re-satisfies whatever it was holding back. Plans extracted
//! from edit constraints replay the current dataflow cheaply.

use deltablue_core::{ConstraintId, Diagnostic, PlannerError, Strength, VariableId};
use indexmap::IndexSet;
use tracing::{debug, trace, warn};

use crate::constraint::{Constraint, ConstraintKind};
use crate::plan::Plan;
use crate::variable::Variable;

/// An independent constraint graph and the state of its current pass.
///
/// Constraints live in an append-only arena so their ids stay valid after
/// [`Planner::destroy_constraint`]. Destroyed constraints are detached but
/// keep their slot, so a long-lived planner that adds and destroys edits
/// grows by one slot per edit.
#[derive(Debug, Default)]
pub struct Planner {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    /// Tag of the most recent pass
    current_mark: u64,
    /// Non-fatal conditions reported so far
    diagnostics: Vec<Diagnostic>,
}

impl Planner {
    /// Create an empty planner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new variable.
    pub fn add_variable(&mut self, name: impl Into<String>, value: f64) -> VariableId {
        let id = VariableId(self.variables.len());
        self.variables.push(Variable::new(name, value));
        id
    }

    pub fn variable(&self, v: VariableId) -> Option<&Variable> {
        self.variables.get(v.index())
    }

    pub fn constraint(&self, c: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(c.index())
    }

    /// Get the current value of a variable.
    pub fn value(&self, v: VariableId) -> Option<f64> {
        self.variable(v).map(Variable::value)
    }

    /// Overwrite a variable's value. Nothing is propagated until a plan runs.
    pub fn set_value(&mut self, v: VariableId, value: f64) -> Result<(), PlannerError> {
        let var = self
            .variables
            .get_mut(v.index())
            .ok_or(PlannerError::UnknownVariable { id: v })?;
        var.value = value;
        Ok(())
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn current_mark(&self) -> u64 {
        self.current_mark
    }

    /// Diagnostics reported since the last [`Planner::take_diagnostics`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Pin `v` at its current value.
    pub fn add_stay(
        &mut self,
        v: VariableId,
        strength: Strength,
    ) -> Result<ConstraintId, PlannerError> {
        self.add_constraint(ConstraintKind::Stay { output: v }, strength)
    }

    /// Mark `v` as edited from outside the graph.
    pub fn add_edit(
        &mut self,
        v: VariableId,
        strength: Strength,
    ) -> Result<ConstraintId, PlannerError> {
        self.add_constraint(ConstraintKind::Edit { output: v }, strength)
    }

    /// Require `v1 == v2`.
    pub fn add_equality(
        &mut self,
        v1: VariableId,
        v2: VariableId,
        strength: Strength,
    ) -> Result<ConstraintId, PlannerError> {
        self.add_constraint(ConstraintKind::Equality { v1, v2 }, strength)
    }

    /// Require `dst == src * scale + offset`.
    pub fn add_scale(
        &mut self,
        src: VariableId,
        scale: VariableId,
        offset: VariableId,
        dst: VariableId,
        strength: Strength,
    ) -> Result<ConstraintId, PlannerError> {
        self.add_constraint(
            ConstraintKind::Scale {
                v1: src,
                scale,
                offset,
                v2: dst,
            },
            strength,
        )
    }

    /// Attach a new constraint to the graph and satisfy it incrementally.
    pub fn add_constraint(
        &mut self,
        kind: ConstraintKind,
        strength: Strength,
    ) -> Result<ConstraintId, PlannerError> {
        let mut constraint = Constraint::new(kind, strength);
        if let Some(&id) = constraint
            .variables()
            .iter()
            .find(|v| v.index() >= self.variables.len())
        {
            return Err(PlannerError::UnknownVariable { id });
        }

        let id = ConstraintId(self.constraints.len());
        constraint.add_to_graph(id, &mut self.variables);
        self.constraints.push(constraint);
        debug!(constraint = %id, ?kind, %strength, "adding constraint");

        self.incremental_add(id);
        Ok(id)
    }

    /// Remove a constraint, letting weaker constraints take over what it held.
    pub fn destroy_constraint(&mut self, c: ConstraintId) -> Result<(), PlannerError> {
        let constraint = self
            .constraints
            .get(c.index())
            .ok_or(PlannerError::UnknownConstraint { id: c })?;
        debug!(constraint = %c, satisfied = constraint.is_satisfied(), "destroying constraint");

        if constraint.is_satisfied() {
            self.incremental_remove(c);
        } else {
            self.constraints[c.0].remove_from_graph(c, &mut self.variables);
        }
        Ok(())
    }

    /// Start a new pass.
    pub fn new_mark(&mut self) -> u64 {
        self.current_mark += 1;
        self.current_mark
    }

    /// Satisfy `c`, then keep re-satisfying whatever it overrode until
    /// nothing else is displaced.
    pub(crate) fn incremental_add(&mut self, c: ConstraintId) {
        let mark = self.new_mark();
        let mut overridden = self.satisfy(c, mark);
        while let Some(next) = overridden {
            overridden = self.satisfy(next, mark);
        }
    }

    /// Remove `c` and give every constraint it was blocking another chance,
    /// one strength tier at a time.
    pub(crate) fn incremental_remove(&mut self, c: ConstraintId) {
        let out = self.constraints[c.0].output();
        self.constraints[c.0].mark_unsatisfied();
        self.constraints[c.0].remove_from_graph(c, &mut self.variables);
        let unsatisfied = self.remove_propagate_from(out);
        debug!(constraint = %c, retry = unsatisfied.len(), "removed constraint");

        // Strongest tier first, every tier once.
        for strength in Strength::ALL {
            for &u in &unsatisfied {
                if self.constraints[u.0].strength() == strength {
                    self.incremental_add(u);
                }
            }
        }
    }

    /// Try to make `c` determine its output during pass `mark`.
    ///
    /// Returns the constraint that previously determined the output, which is
    /// now unsatisfied and must be re-satisfied by the caller.
    fn satisfy(&mut self, c: ConstraintId, mark: u64) -> Option<ConstraintId> {
        // Already re-satisfied by a nested removal, or rolled back by one
        let current = &self.constraints[c.0];
        if current.is_satisfied() || !current.is_attached() {
            return None;
        }

        self.constraints[c.0].choose_method(&self.variables, mark);
        let constraint = &self.constraints[c.0];
        if !constraint.is_satisfied() {
            if constraint.strength().is_required() {
                self.report(Diagnostic::RequiredUnsatisfiable { constraint: c });
            }
            return None;
        }

        constraint.mark_inputs(&mut self.variables, mark);
        let out = constraint.output();
        let overridden = self.variables[out.0].determined_by;
        if let Some(o) = overridden {
            self.constraints[o.0].mark_unsatisfied();
        }
        self.variables[out.0].determined_by = Some(c);
        trace!(constraint = %c, output = %out, ?overridden, "satisfied");

        if !self.add_propagate(c, mark) {
            self.report(Diagnostic::CycleDetected { constraint: c });
        }
        self.variables[out.0].mark = mark;
        overridden
    }

    /// Recalculate everything downstream of `c`. Returns false (after rolling
    /// `c` back) if an output computed this pass is reached again.
    pub(crate) fn add_propagate(&mut self, c: ConstraintId, mark: u64) -> bool {
        let mut todo = vec![c];
        while let Some(d) = todo.pop() {
            let out = self.constraints[d.0].output();
            if self.variables[out.0].mark == mark {
                self.incremental_remove(c);
                return false;
            }
            self.constraints[d.0].recalculate(&mut self.variables);
            self.add_constraints_consuming_to(out, &mut todo);
        }
        true
    }

    /// Detach `out` from its determiner and walk downstream, recalculating
    /// satisfied constraints. Returns the unsatisfied constraints seen on the
    /// way, each once, in discovery order.
    pub(crate) fn remove_propagate_from(&mut self, out: VariableId) -> IndexSet<ConstraintId> {
        let var = &mut self.variables[out.0];
        var.determined_by = None;
        var.walk_strength = Strength::Weakest;
        var.stay = true;

        let mut unsatisfied = IndexSet::new();
        let mut todo = vec![out];
        while let Some(v) = todo.pop() {
            let attached = self.variables[v.0].constraints.clone();
            for &c in &attached {
                if !self.constraints[c.0].is_satisfied() {
                    unsatisfied.insert(c);
                }
            }
            let determining = self.variables[v.0].determined_by;
            for &next in &attached {
                let constraint = &self.constraints[next.0];
                if Some(next) != determining && constraint.is_satisfied() {
                    constraint.recalculate(&mut self.variables);
                    todo.push(constraint.output());
                }
            }
        }
        unsatisfied
    }

    /// Append every satisfied constraint that reads `v`.
    pub(crate) fn add_constraints_consuming_to(
        &self,
        v: VariableId,
        coll: &mut Vec<ConstraintId>,
    ) {
        let var = &self.variables[v.0];
        let determining = var.determined_by;
        coll.extend(
            var.constraints
                .iter()
                .copied()
                .filter(|&c| Some(c) != determining && self.constraints[c.0].is_satisfied()),
        );
    }

    /// Build a plan by walking downstream from `sources`, scheduling each
    /// constraint once its inputs are known. The worklist is a stack.
    pub fn make_plan(&mut self, sources: Vec<ConstraintId>) -> Plan {
        let mark = self.new_mark();
        let mut plan = Plan::new();
        let mut todo = sources;
        while let Some(c) = todo.pop() {
            let Some(constraint) = self.constraints.get(c.0) else {
                continue;
            };
            let out = constraint.output();
            if self.variables[out.0].mark != mark
                && constraint.inputs_known(&self.variables, mark)
            {
                plan.add(c);
                self.variables[out.0].mark = mark;
                self.add_constraints_consuming_to(out, &mut todo);
            }
        }
        debug!(steps = plan.len(), "extracted plan");
        plan
    }

    /// Build a plan from the satisfied edit constraints among `constraints`.
    pub fn extract_plan_from_constraints(&mut self, constraints: &[ConstraintId]) -> Plan {
        let sources = constraints
            .iter()
            .copied()
            .filter(|c| {
                self.constraint(*c)
                    .is_some_and(|c| c.is_input() && c.is_satisfied())
            })
            .collect();
        self.make_plan(sources)
    }

    pub(crate) fn execute_constraint(&mut self, c: ConstraintId) {
        if let Some(constraint) = self.constraints.get(c.0) {
            constraint.execute(&mut self.variables);
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(constraint = %diagnostic.constraint(), "{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}
