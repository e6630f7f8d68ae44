//! The projection scenario: pairs of variables linked by `dst = src * scale + offset`.

use deltablue_constraint::{Planner, Strength, VariableId};
use tracing::debug;

use crate::edit::{change_at, read};
use crate::error::{ScenarioError, ScenarioResult};

/// Variables built by [`Projection::build`].
#[derive(Debug, Clone)]
pub struct Projection {
    pub scale: VariableId,
    pub offset: VariableId,
    pub src: Vec<VariableId>,
    pub dst: Vec<VariableId>,
}

impl Projection {
    /// Create `n` src/dst pairs with `scale = 10`, `offset = 1000` and
    /// `src[i] = dst[i] = i`.
    pub fn build(planner: &mut Planner, n: usize) -> ScenarioResult<Self> {
        let scale = planner.add_variable("scale", 10.0);
        let offset = planner.add_variable("offset", 1000.0);
        let mut src = Vec::with_capacity(n);
        let mut dst = Vec::with_capacity(n);

        for i in 0..n {
            let s = planner.add_variable(format!("src{}", i), i as f64);
            let d = planner.add_variable(format!("dst{}", i), i as f64);
            planner.add_stay(s, Strength::Normal)?;
            planner.add_scale(s, scale, offset, d, Strength::Required)?;
            src.push(s);
            dst.push(d);
        }
        Ok(Self {
            scale,
            offset,
            src,
            dst,
        })
    }

    pub fn len(&self) -> usize {
        self.src.len()
    }

    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }

    /// Every pair satisfies `dst == src * scale + offset`.
    pub fn check_consistent(&self, planner: &Planner, stage: &'static str) -> ScenarioResult<()> {
        let scale = read(planner, self.scale)?;
        let offset = read(planner, self.offset)?;
        for (index, (&s, &d)) in self.src.iter().zip(&self.dst).enumerate() {
            let expected = read(planner, s)? * scale + offset;
            check(stage, index, expected, read(planner, d)?)?;
        }
        Ok(())
    }

    /// `dst[i] == i * scale + offset` for every pair whose src was not edited.
    fn check_untouched(
        &self,
        planner: &Planner,
        stage: &'static str,
        scale: f64,
        offset: f64,
    ) -> ScenarioResult<()> {
        let untouched = self.len().saturating_sub(1);
        for (index, &d) in self.dst.iter().enumerate().take(untouched) {
            check(stage, index, index as f64 * scale + offset, read(planner, d)?)?;
        }
        Ok(())
    }
}

/// Run the projection scenario with preferred edits replayed ten times.
pub fn projection_test(n: usize) -> ScenarioResult<Planner> {
    projection_test_at(n, Strength::Preferred, 10)
}

/// [`projection_test`] with an explicit edit strength and replay count.
pub fn projection_test_at(
    n: usize,
    edit_strength: Strength,
    repeat: usize,
) -> ScenarioResult<Planner> {
    if n == 0 {
        return Ok(Planner::new());
    }
    let mut planner = Planner::new();
    let projection = Projection::build(&mut planner, n)?;
    let last = n - 1;
    debug!(n, constraints = planner.constraint_count(), "projection built");

    change_at(&mut planner, projection.src[last], 17.0, edit_strength, repeat)?;
    check("src edit", last, 1170.0, read(&planner, projection.dst[last])?)?;

    change_at(&mut planner, projection.dst[last], 1050.0, edit_strength, repeat)?;
    check("dst edit", last, 5.0, read(&planner, projection.src[last])?)?;

    change_at(&mut planner, projection.scale, 5.0, edit_strength, repeat)?;
    projection.check_untouched(&planner, "scale edit", 5.0, 1000.0)?;

    change_at(&mut planner, projection.offset, 2000.0, edit_strength, repeat)?;
    projection.check_untouched(&planner, "offset edit", 5.0, 2000.0)?;

    projection.check_consistent(&planner, "final")?;
    Ok(planner)
}

fn check(stage: &'static str, index: usize, expected: f64, found: f64) -> ScenarioResult<()> {
    if found != expected {
        return Err(ScenarioError::ProjectionMismatch {
            stage,
            index,
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_consistent() {
        let mut planner = Planner::new();
        let projection = Projection::build(&mut planner, 4).unwrap();
        assert_eq!(projection.len(), 4);
        // scale, offset, then a src/dst pair per index
        assert_eq!(planner.variable_count(), 10);
        assert_eq!(planner.constraint_count(), 8);
        assert!(projection.check_consistent(&planner, "build").is_ok());
        assert_eq!(planner.value(projection.dst[3]), Some(1030.0));
    }

    #[test]
    fn test_empty_projection() {
        let planner = projection_test(0).unwrap();
        assert_eq!(planner.variable_count(), 0);
    }

    #[test]
    fn test_single_pair() {
        let planner = projection_test(1).unwrap();
        // src0 was edited to 5, so dst0 = 5 * 5 + 2000
        assert_eq!(planner.value(VariableId(3)), Some(2025.0));
        assert!(planner.diagnostics().is_empty());
    }

    #[test]
    fn test_inconsistent_pair_is_reported() {
        let mut planner = Planner::new();
        let projection = Projection::build(&mut planner, 2).unwrap();
        planner.set_value(projection.dst[1], 0.0).unwrap();
        let err = projection.check_consistent(&planner, "tampered").unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::ProjectionMismatch { stage: "tampered", index: 1, .. }
        ));
    }
}
