//! Variance reduction criterion for regression.

use super::{clamp_merit, SplitCriterion};
use crate::core::constants::DEFAULT_MIN_BRANCH_WEIGHT;
use crate::model::Feature;
use crate::stats::{ClassStats, Distribution, StreamStats};

/// Drop in sample variance achieved by a split.
///
/// Only branches carrying at least `min_weight` take part; fewer than two
/// such branches yields no merit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceReduction {
    /// Minimum weight a branch needs to count
    pub min_weight: f64,
}

impl VarianceReduction {
    /// Creates the criterion with a custom minimum branch weight.
    pub fn new(min_weight: f64) -> Self {
        VarianceReduction { min_weight }
    }
}

impl Default for VarianceReduction {
    fn default() -> Self {
        VarianceReduction::new(DEFAULT_MIN_BRANCH_WEIGHT)
    }
}

impl SplitCriterion for VarianceReduction {
    fn supports(&self, target: &Feature) -> bool {
        target.is_numerical()
    }

    fn classification_range(&self, _pre: &ClassStats) -> f64 {
        0.0
    }

    fn classification_merit(&self, _pre: &ClassStats, _post: &Distribution<ClassStats>) -> f64 {
        0.0
    }

    fn regression_range(&self, _pre: &StreamStats) -> f64 {
        1.0
    }

    fn regression_merit(&self, pre: &StreamStats, post: &Distribution<StreamStats>) -> f64 {
        let relevant: Vec<&StreamStats> = post
            .iter()
            .map(|(_, stats)| stats)
            .filter(|stats| stats.weight() > 0.0 && stats.weight() >= self.min_weight)
            .collect();
        if relevant.len() < 2 {
            return 0.0;
        }

        let pre_variance = pre.variance();
        if pre_variance.is_nan() {
            return 0.0;
        }

        let relevant_weight: f64 = relevant.iter().map(|stats| stats.weight()).sum();
        let post_variance: f64 = relevant
            .iter()
            .filter_map(|stats| {
                let variance = stats.variance();
                (!variance.is_nan()).then(|| stats.weight() * variance)
            })
            .sum::<f64>()
            / relevant_weight;
        clamp_merit(pre_variance - post_variance)
    }
}
