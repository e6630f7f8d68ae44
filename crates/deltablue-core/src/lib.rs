//! Core types for the DeltaBlue constraint engine.
//!
//! This crate provides the foundational types shared by the planner and the
//! scenario drivers:
//! - Constraint strengths and their ordering
//! - Handles for variables and constraints
//! - Error and diagnostic types

pub mod errors;
pub mod strength;
pub mod types;

pub use errors::*;
pub use strength::*;
pub use types::*;
