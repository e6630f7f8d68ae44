//! Incremental constraint planning for DeltaBlue graphs.
//!
//! This crate implements:
//! - Variables and the stay/edit/equality/scale constraint kinds
//! - The incremental planner (add, remove, propagate)
//! - Plan extraction and execution
//!
//! # Example
//!
//! ```
//! use deltablue_constraint::Planner;
//! use deltablue_core::Strength;
//!
//! let mut planner = Planner::new();
//! let a = planner.add_variable("a", 1.0);
//! let b = planner.add_variable("b", 0.0);
//! planner.add_equality(a, b, Strength::Required).unwrap();
//! let edit = planner.add_edit(a, Strength::Preferred).unwrap();
//!
//! let plan = planner.extract_plan_from_constraints(&[edit]);
//! planner.set_value(a, 42.0).unwrap();
//! plan.execute(&mut planner);
//! assert_eq!(planner.value(b), Some(42.0));
//! ```

mod constraint;
mod plan;
mod planner;
mod variable;

pub use constraint::{Constraint, ConstraintKind};
pub use plan::Plan;
pub use planner::Planner;
pub use variable::Variable;

pub use deltablue_core::{ConstraintId, Diagnostic, Direction, PlannerError, Strength, VariableId};
