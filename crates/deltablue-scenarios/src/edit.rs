use deltablue_constraint::{Planner, PlannerError, Strength, VariableId};
use tracing::trace;

/// Drive `v` to `value` through a temporary preferred edit constraint.
///
/// The edit's plan is extracted once and replayed `repeat` times, then the
/// edit is destroyed so the graph settles back onto its stays.
pub fn change(
    planner: &mut Planner,
    v: VariableId,
    value: f64,
    repeat: usize,
) -> Result<(), PlannerError> {
    change_at(planner, v, value, Strength::Preferred, repeat)
}

/// [`change`] with an explicit edit strength.
pub fn change_at(
    planner: &mut Planner,
    v: VariableId,
    value: f64,
    strength: Strength,
    repeat: usize,
) -> Result<(), PlannerError> {
    let edit = planner.add_edit(v, strength)?;
    let plan = planner.extract_plan_from_constraints(&[edit]);
    trace!(variable = %v, value, steps = plan.len(), repeat, "replaying edit plan");

    for _ in 0..repeat {
        planner.set_value(v, value)?;
        plan.execute(planner);
    }

    planner.destroy_constraint(edit)
}

/// Read a variable the scenario created itself.
pub(crate) fn read(planner: &Planner, v: VariableId) -> Result<f64, PlannerError> {
    planner
        .value(v)
        .ok_or(PlannerError::UnknownVariable { id: v })
}

#[cfg(test)]
mod tests {
    use super::*;
    use deltablue_constraint::ConstraintId;

    #[test]
    fn test_change_propagates_and_releases_edit() {
        let mut planner = Planner::new();
        let a = planner.add_variable("a", 0.0);
        let b = planner.add_variable("b", 0.0);
        planner.add_stay(a, Strength::Normal).unwrap();
        planner.add_equality(a, b, Strength::Required).unwrap();
        let constraints = planner.constraint_count();

        change(&mut planner, a, 7.0, 3).unwrap();

        assert_eq!(planner.value(a), Some(7.0));
        assert_eq!(planner.value(b), Some(7.0));
        // The edit stays in the arena but no longer drives anything.
        assert_eq!(planner.constraint_count(), constraints + 1);
        let edit = planner.constraint(ConstraintId(constraints)).unwrap();
        assert!(!edit.is_satisfied());
        assert!(!edit.is_attached());
    }

    #[test]
    fn test_change_unknown_variable() {
        let mut planner = Planner::new();
        let result = change(&mut planner, VariableId(3), 1.0, 1);
        assert_eq!(result, Err(PlannerError::UnknownVariable { id: VariableId(3) }));
    }
}
