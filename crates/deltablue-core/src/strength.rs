//! Constraint strengths.
//!
//! Strengths rank constraints against each other. When two constraints compete
//! for the same variable, the stronger one wins and the weaker one is left
//! unsatisfied. `Required` constraints must always hold.

use std::fmt;

/// Constraint strength levels, from most to least binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strength {
    Required,
    StrongPreferred,
    Preferred,
    StrongDefault,
    Normal,
    WeakDefault,
    Weakest,
}

impl Strength {
    /// Every strength, strongest first.
    pub const ALL: [Strength; 7] = [
        Strength::Required,
        Strength::StrongPreferred,
        Strength::Preferred,
        Strength::StrongDefault,
        Strength::Normal,
        Strength::WeakDefault,
        Strength::Weakest,
    ];

    /// Numeric rank. Lower is stronger.
    pub const fn value(self) -> u8 {
        match self {
            Strength::Required => 0,
            Strength::StrongPreferred => 1,
            Strength::Preferred => 2,
            Strength::StrongDefault => 3,
            Strength::Normal => 4,
            Strength::WeakDefault => 5,
            Strength::Weakest => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strength::Required => "required",
            Strength::StrongPreferred => "strongPreferred",
            Strength::Preferred => "preferred",
            Strength::StrongDefault => "strongDefault",
            Strength::Normal => "normal",
            Strength::WeakDefault => "weakDefault",
            Strength::Weakest => "weakest",
        }
    }

    /// Check if this is a required strength.
    pub fn is_required(self) -> bool {
        self == Strength::Required
    }

    /// True if `a` is strictly stronger than `b`.
    pub fn stronger(a: Strength, b: Strength) -> bool {
        a.value() < b.value()
    }

    /// True if `a` is strictly weaker than `b`.
    pub fn weaker(a: Strength, b: Strength) -> bool {
        a.value() > b.value()
    }

    /// The stronger of two strengths.
    pub fn strongest(a: Strength, b: Strength) -> Strength {
        if Strength::stronger(a, b) {
            a
        } else {
            b
        }
    }

    /// The weaker of two strengths.
    pub fn weakest_of(a: Strength, b: Strength) -> Strength {
        if Strength::weaker(a, b) {
            a
        } else {
            b
        }
    }

    /// The next tier visited when re-satisfying constraints after a removal.
    ///
    /// This is a cycle rather than a descending ladder:
    /// `Required -> Weakest -> WeakDefault -> Normal -> StrongDefault ->
    /// Preferred -> Required`. `StrongPreferred` sits outside the cycle and
    /// feeds into `WeakDefault`.
    pub fn next_weaker(self) -> Strength {
        match self {
            Strength::Required => Strength::Weakest,
            Strength::Weakest => Strength::WeakDefault,
            Strength::StrongPreferred => Strength::WeakDefault,
            Strength::WeakDefault => Strength::Normal,
            Strength::Normal => Strength::StrongDefault,
            Strength::StrongDefault => Strength::Preferred,
            Strength::Preferred => Strength::Required,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
