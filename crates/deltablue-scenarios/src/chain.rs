//! The chain scenario: a line of required equalities driven from one end.

use deltablue_constraint::{Planner, Strength, VariableId};
use tracing::debug;

use crate::edit::read;
use crate::error::{ScenarioError, ScenarioResult};

/// Values pushed through the chain per run.
pub const CHAIN_STEPS: usize = 100;

/// Build an `n`-variable chain, edit its head and check that every value
/// reaches the tail.
///
/// Returns the planner so callers can inspect the final graph.
pub fn chain_test(n: usize) -> ScenarioResult<Planner> {
    chain_test_at(n, Strength::Preferred)
}

/// [`chain_test`] with an explicit strength for the head's edit.
pub fn chain_test_at(n: usize, edit_strength: Strength) -> ScenarioResult<Planner> {
    let mut planner = Planner::new();
    let (first, last) = build_chain(&mut planner, n)?;

    planner.add_stay(last, Strength::StrongDefault)?;
    let edit = planner.add_edit(first, edit_strength)?;
    let plan = planner.extract_plan_from_constraints(&[edit]);
    debug!(n, steps = plan.len(), "chain plan extracted");

    for step in 0..CHAIN_STEPS {
        let expected = step as f64;
        planner.set_value(first, expected)?;
        plan.execute(&mut planner);

        let found = read(&planner, last)?;
        if found != expected {
            return Err(ScenarioError::ChainMismatch {
                step,
                expected,
                found,
            });
        }
    }
    Ok(planner)
}

/// Add `n` variables joined head to tail by required equalities.
fn build_chain(planner: &mut Planner, n: usize) -> ScenarioResult<(VariableId, VariableId)> {
    let first = planner.add_variable("v0", 0.0);
    let mut prev = first;
    for i in 1..n {
        let v = planner.add_variable(format!("v{}", i), 0.0);
        planner.add_equality(prev, v, Strength::Required)?;
        prev = v;
    }
    Ok((first, prev))
}
