//! Tree diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary of a tree's shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeInfo {
    /// Reachable nodes
    pub num_nodes: usize,
    /// Leaves still collecting feature stats
    pub num_learning: usize,
    /// Disabled leaves
    pub num_disabled: usize,
    /// Depth of the deepest node, the root being at depth 1
    pub max_depth: usize,
}

impl fmt::Display for TreeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes: {}, learning: {}, disabled: {}, depth: {}",
            self.num_nodes, self.num_learning, self.num_disabled, self.max_depth
        )
    }
}

/// Outcome of a split attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitAttemptInfo {
    /// Leaf weight at the time of the attempt
    pub weight: f64,
    /// Merit of the best candidate minus the second best
    pub merit_gain: f64,
    /// Hoeffding bound, zero when the bound was not needed
    pub hoeffding_bound: f64,
    /// Evaluated candidates as `(feature, merit)`, best first
    pub candidates: Vec<(String, f64)>,
    /// Whether the leaf was split
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_info_display() {
        let info = TreeInfo {
            num_nodes: 6,
            num_learning: 4,
            num_disabled: 0,
            max_depth: 3,
        };
        assert_eq!(info.to_string(), "nodes: 6, learning: 4, disabled: 0, depth: 3");
        assert_eq!(TreeInfo::default().num_nodes, 0);
    }
}
