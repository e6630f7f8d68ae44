//! Constraint kinds and their per-pass decision logic.
//!
//! A constraint never owns the variables it touches; it holds handles into
//! the planner's variable arena and receives that arena on every call.

use deltablue_core::{ConstraintId, Direction, Strength, VariableId};
use smallvec::{smallvec, SmallVec};

use crate::variable::Variable;

/// The closed set of constraint kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Keeps `output` at its current value.
    Stay { output: VariableId },
    /// Marks `output` as externally edited.
    Edit { output: VariableId },
    /// `v1 == v2`
    Equality { v1: VariableId, v2: VariableId },
    /// `v2 == v1 * scale + offset`
    Scale {
        v1: VariableId,
        scale: VariableId,
        offset: VariableId,
        v2: VariableId,
    },
}

/// A constraint in a planner's graph.
#[derive(Debug, Clone)]
pub struct Constraint {
    strength: Strength,
    kind: ConstraintKind,
    direction: Direction,
    attached: bool,
}

impl Constraint {
    /// Create a detached, unsatisfied constraint.
    pub fn new(kind: ConstraintKind, strength: Strength) -> Self {
        Self {
            strength,
            kind,
            direction: Direction::None,
            attached: false,
        }
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True for edits, the only valid plan sources.
    pub fn is_input(&self) -> bool {
        matches!(self.kind, ConstraintKind::Edit { .. })
    }

    pub fn is_satisfied(&self) -> bool {
        self.direction != Direction::None
    }

    /// False once the constraint has been destroyed or rolled back.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn mark_unsatisfied(&mut self) {
        self.direction = Direction::None;
    }

    /// Every variable this constraint is attached to.
    pub fn variables(&self) -> SmallVec<[VariableId; 4]> {
        match self.kind {
            ConstraintKind::Stay { output } | ConstraintKind::Edit { output } => smallvec![output],
            ConstraintKind::Equality { v1, v2 } => smallvec![v1, v2],
            ConstraintKind::Scale {
                v1,
                scale,
                offset,
                v2,
            } => smallvec![v1, v2, scale, offset],
        }
    }

    fn endpoints(&self) -> Option<(VariableId, VariableId)> {
        match self.kind {
            ConstraintKind::Equality { v1, v2 } | ConstraintKind::Scale { v1, v2, .. } => {
                Some((v1, v2))
            }
            ConstraintKind::Stay { .. } | ConstraintKind::Edit { .. } => None,
        }
    }

    /// The variable a binary constraint reads this pass. `None` for unary kinds.
    pub fn input(&self) -> Option<VariableId> {
        self.endpoints().map(|(v1, v2)| match self.direction {
            Direction::Forward => v1,
            _ => v2,
        })
    }

    /// The variable this constraint computes.
    pub fn output(&self) -> VariableId {
        match self.kind {
            ConstraintKind::Stay { output } | ConstraintKind::Edit { output } => output,
            ConstraintKind::Equality { v1, v2 } | ConstraintKind::Scale { v1, v2, .. } => {
                match self.direction {
                    Direction::Forward => v2,
                    _ => v1,
                }
            }
        }
    }

    pub(crate) fn add_to_graph(&mut self, id: ConstraintId, vars: &mut [Variable]) {
        for v in self.variables() {
            vars[v.0].add_constraint(id);
        }
        self.attached = true;
        self.direction = Direction::None;
    }

    pub(crate) fn remove_from_graph(&mut self, id: ConstraintId, vars: &mut [Variable]) {
        for v in self.variables() {
            vars[v.0].remove_constraint(id);
        }
        self.attached = false;
        self.direction = Direction::None;
    }

    /// Decide whether and which way this constraint is satisfied this pass.
    pub(crate) fn choose_method(&mut self, vars: &[Variable], mark: u64) {
        let strength = self.strength;
        let Some((v1, v2)) = self.endpoints() else {
            let out = &vars[self.output().0];
            self.direction = if out.mark != mark && Strength::stronger(strength, out.walk_strength)
            {
                Direction::Forward
            } else {
                Direction::None
            };
            return;
        };

        let (a, b) = (&vars[v1.0], &vars[v2.0]);
        if a.mark == mark {
            self.direction = if b.mark != mark && Strength::stronger(strength, b.walk_strength) {
                Direction::Forward
            } else {
                Direction::None
            };
        }
        if b.mark == mark {
            self.direction = if a.mark != mark && Strength::stronger(strength, a.walk_strength) {
                Direction::Backward
            } else {
                Direction::None
            };
        }
        // The walk strength comparison always has the last word.
        if Strength::weaker(a.walk_strength, b.walk_strength) {
            self.direction = if Strength::stronger(strength, a.walk_strength) {
                Direction::Backward
            } else {
                Direction::None
            };
        } else {
            self.direction = if Strength::stronger(strength, b.walk_strength) {
                Direction::Forward
            } else {
                Direction::Backward
            };
        }
    }

    /// Tag the variables this constraint reads so the pass does not treat them
    /// as outputs.
    pub(crate) fn mark_inputs(&self, vars: &mut [Variable], mark: u64) {
        if let Some(input) = self.input() {
            vars[input.0].mark = mark;
        }
        if let ConstraintKind::Scale { scale, offset, .. } = self.kind {
            vars[scale.0].mark = mark;
            vars[offset.0].mark = mark;
        }
    }

    /// True if every input is already computed this pass or is constant.
    pub(crate) fn inputs_known(&self, vars: &[Variable], mark: u64) -> bool {
        let known = |id: VariableId| {
            let v = &vars[id.0];
            v.mark == mark || v.stay || v.determined_by.is_none()
        };
        let Some(input) = self.input() else {
            return true;
        };
        match self.kind {
            ConstraintKind::Scale { scale, offset, .. } => {
                known(input) && known(scale) && known(offset)
            }
            _ => known(input),
        }
    }

    /// Refresh the output's walk strength and stay flag after a direction has
    /// been chosen, executing immediately if the output is constant.
    pub(crate) fn recalculate(&self, vars: &mut [Variable]) {
        let out = self.output();
        let (walk_strength, stay) = match self.kind {
            ConstraintKind::Stay { .. } | ConstraintKind::Edit { .. } => {
                (self.strength, !self.is_input())
            }
            ConstraintKind::Equality { .. } => {
                let input = &vars[self.input_or_output().0];
                (
                    Strength::weakest_of(self.strength, input.walk_strength),
                    input.stay,
                )
            }
            ConstraintKind::Scale { scale, offset, .. } => {
                let input = &vars[self.input_or_output().0];
                (
                    Strength::weakest_of(self.strength, input.walk_strength),
                    input.stay && vars[scale.0].stay && vars[offset.0].stay,
                )
            }
        };
        vars[out.0].walk_strength = walk_strength;
        vars[out.0].stay = stay;
        if stay {
            self.execute(vars);
        }
    }

    fn input_or_output(&self) -> VariableId {
        self.input().unwrap_or_else(|| self.output())
    }

    /// Compute the output from the inputs.
    pub(crate) fn execute(&self, vars: &mut [Variable]) {
        match self.kind {
            ConstraintKind::Stay { .. } | ConstraintKind::Edit { .. } => {}
            ConstraintKind::Equality { .. } => {
                let value = vars[self.input_or_output().0].value;
                vars[self.output().0].value = value;
            }
            ConstraintKind::Scale {
                v1,
                scale,
                offset,
                v2,
            } => {
                let (scale, offset) = (vars[scale.0].value, vars[offset.0].value);
                if self.direction == Direction::Forward {
                    vars[v2.0].value = vars[v1.0].value * scale + offset;
                } else {
                    vars[v1.0].value = (vars[v2.0].value - offset) / scale;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(n: usize) -> Vec<Variable> {
        (0..n)
            .map(|i| Variable::new(format!("v{}", i), i as f64))
            .collect()
    }

    fn equality() -> Constraint {
        Constraint::new(
            ConstraintKind::Equality {
                v1: VariableId(0),
                v2: VariableId(1),
            },
            Strength::Required,
        )
    }

    #[test]
    fn test_add_and_remove_from_graph() {
        let mut vs = vars(4);
        let mut c = Constraint::new(
            ConstraintKind::Scale {
                v1: VariableId(0),
                scale: VariableId(2),
                offset: VariableId(3),
                v2: VariableId(1),
            },
            Strength::Required,
        );
        c.add_to_graph(ConstraintId(7), &mut vs);
        assert!(c.is_attached());
        for v in &vs {
            assert_eq!(v.constraints(), &[ConstraintId(7)]);
        }
        c.remove_from_graph(ConstraintId(7), &mut vs);
        assert!(vs.iter().all(|v| v.constraints().is_empty()));
        assert!(!c.is_satisfied());
        assert!(!c.is_attached());
    }

    #[test]
    fn test_unary_choose_method() {
        let mut vs = vars(1);
        let mut stay = Constraint::new(
            ConstraintKind::Stay {
                output: VariableId(0),
            },
            Strength::Normal,
        );
        stay.choose_method(&vs, 1);
        assert!(stay.is_satisfied());

        // Already visited this pass
        vs[0].mark = 2;
        stay.choose_method(&vs, 2);
        assert!(!stay.is_satisfied());

        // Driven by something at least as strong
        vs[0].walk_strength = Strength::Normal;
        stay.choose_method(&vs, 3);
        assert!(!stay.is_satisfied());
    }

    #[test]
    fn test_binary_choose_method_follows_walk_strengths() {
        let mut vs = vars(2);
        let mut c = equality();

        // Equal walk strengths: forward
        c.choose_method(&vs, 1);
        assert_eq!(c.direction(), Direction::Forward);
        assert_eq!(c.input(), Some(VariableId(0)));
        assert_eq!(c.output(), VariableId(1));

        // v1 weaker than v2: backward
        vs[1].walk_strength = Strength::Normal;
        c.choose_method(&vs, 2);
        assert_eq!(c.direction(), Direction::Backward);
        assert_eq!(c.output(), VariableId(0));
    }

    #[test]
    fn test_binary_choose_method_marks_do_not_override_walk_strengths() {
        let mut vs = vars(2);
        let mut c = equality();
        // v2 marked would suggest backward, but equal walk strengths decide
        vs[1].mark = 5;
        c.choose_method(&vs, 5);
        assert_eq!(c.direction(), Direction::Forward);
    }

    #[test]
    fn test_weak_binary_falls_back_to_backward() {
        let mut vs = vars(2);
        let mut c = Constraint::new(
            ConstraintKind::Equality {
                v1: VariableId(0),
                v2: VariableId(1),
            },
            Strength::Weakest,
        );
        c.choose_method(&vs, 1);
        assert_eq!(c.direction(), Direction::Backward);

        vs[1].walk_strength = Strength::Required;
        c.choose_method(&vs, 2);
        assert_eq!(c.direction(), Direction::None);
    }

    #[test]
    fn test_scale_execute_both_directions() {
        let mut vs = vars(4);
        vs[0].value = 3.0;
        vs[2].value = 10.0;
        vs[3].value = 1000.0;
        let mut c = Constraint::new(
            ConstraintKind::Scale {
                v1: VariableId(0),
                scale: VariableId(2),
                offset: VariableId(3),
                v2: VariableId(1),
            },
            Strength::Required,
        );
        c.direction = Direction::Forward;
        c.execute(&mut vs);
        assert_eq!(vs[1].value, 1030.0);

        vs[1].value = 1050.0;
        c.direction = Direction::Backward;
        c.execute(&mut vs);
        assert_eq!(vs[0].value, 5.0);
    }

    #[test]
    fn test_recalculate_scale_stays_only_with_constant_factors() {
        let mut vs = vars(4);
        let mut c = Constraint::new(
            ConstraintKind::Scale {
                v1: VariableId(0),
                scale: VariableId(2),
                offset: VariableId(3),
                v2: VariableId(1),
            },
            Strength::Required,
        );
        c.direction = Direction::Forward;
        vs[0].walk_strength = Strength::Normal;
        c.recalculate(&mut vs);
        assert_eq!(vs[1].walk_strength, Strength::Normal);
        assert!(vs[1].stay);
        assert_eq!(vs[1].value, 0.0 * 2.0 + 3.0);

        vs[2].stay = false;
        vs[0].value = 4.0;
        c.recalculate(&mut vs);
        assert!(!vs[1].stay);
        assert_eq!(vs[1].value, 3.0);
    }

    #[test]
    fn test_inputs_known() {
        let mut vs = vars(2);
        let mut c = equality();
        c.direction = Direction::Forward;
        assert!(c.inputs_known(&vs, 1));

        vs[0].stay = false;
        vs[0].determined_by = Some(ConstraintId(3));
        assert!(!c.inputs_known(&vs, 1));

        c.mark_inputs(&mut vs, 1);
        assert!(c.inputs_known(&vs, 1));
    }
}
