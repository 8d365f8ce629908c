//! Core data types shared across the tree engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category index assigned to a categorical value.
pub type Category = usize;

/// 1-based reference to a node in the tree arena.
pub type NodeRef = usize;

/// The reference value that never resolves to a node.
pub const NO_NODE: NodeRef = 0;

/// Returns true if the value is a usable numeric observation.
#[inline]
pub fn is_number(value: f64) -> bool {
    value.is_finite()
}

/// Kind of a feature, which decides how its values are observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Values map to small non-negative category indices
    Categorical,
    /// Values are real numbers
    Numerical,
}

impl FeatureKind {
    /// Returns true for categorical features.
    pub fn is_categorical(self) -> bool {
        self == FeatureKind::Categorical
    }

    /// Returns true for numerical features.
    pub fn is_numerical(self) -> bool {
        self == FeatureKind::Numerical
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Categorical => write!(f, "categorical"),
            FeatureKind::Numerical => write!(f, "numerical"),
        }
    }
}
