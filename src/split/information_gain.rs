//! Entropy-based split criterion for classification.

use super::{clamp_merit, SplitCriterion};
use crate::core::constants::DEFAULT_MIN_BRANCH_FRACTION;
use crate::model::Feature;
use crate::stats::{branch_weights, total_weight, ClassStats, Distribution, StreamStats};

/// Reduction of entropy (in bits) achieved by a split.
///
/// A split only qualifies when at least two branches each receive more than
/// `min_branch_fraction` of the total weight. A non-positive fraction lets
/// every non-empty branch qualify.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InformationGain {
    /// Minimum share of the weight a branch needs to count
    pub min_branch_fraction: f64,
}

impl InformationGain {
    /// Creates the criterion with a custom minimum branch fraction.
    pub fn new(min_branch_fraction: f64) -> Self {
        InformationGain {
            min_branch_fraction,
        }
    }

    fn qualifying_branches(&self, post: &Distribution<ClassStats>, total: f64) -> usize {
        branch_weights(post)
            .into_iter()
            .filter(|&w| self.min_branch_fraction <= 0.0 || w / total > self.min_branch_fraction)
            .count()
    }
}

impl Default for InformationGain {
    fn default() -> Self {
        InformationGain::new(DEFAULT_MIN_BRANCH_FRACTION)
    }
}

impl SplitCriterion for InformationGain {
    fn supports(&self, target: &Feature) -> bool {
        target.is_categorical()
    }

    fn classification_range(&self, pre: &ClassStats) -> f64 {
        let num_categories = pre.num_categories();
        if num_categories > 2 {
            (num_categories as f64).log2()
        } else {
            1.0
        }
    }

    fn classification_merit(&self, pre: &ClassStats, post: &Distribution<ClassStats>) -> f64 {
        let total = total_weight(post);
        if !(total > 0.0) || post.len() < 2 || self.qualifying_branches(post, total) < 2 {
            return 0.0;
        }

        let post_entropy: f64 = post
            .iter()
            .map(|(_, stats)| stats.weight() * stats.entropy())
            .sum::<f64>()
            / total;
        clamp_merit(pre.entropy() - post_entropy)
    }

    fn regression_range(&self, _pre: &StreamStats) -> f64 {
        0.0
    }

    fn regression_merit(&self, _pre: &StreamStats, _post: &Distribution<StreamStats>) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::fixtures::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_merit() {
        let criterion = InformationGain::default();
        assert_abs_diff_eq!(
            criterion.classification_merit(&cls_pre(), &cls_post1()),
            0.279982,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            criterion.classification_merit(&cls_pre(), &cls_post2()),
            0.336966,
            epsilon = 1e-6
        );
        assert_eq!(criterion.classification_merit(&cls_pre(), &cls_post3()), 0.0);
    }

    #[test]
    fn test_min_branch_fraction() {
        let criterion = InformationGain::new(0.3);
        assert_abs_diff_eq!(
            criterion.classification_merit(&cls_pre(), &cls_post1()),
            0.279982,
            epsilon = 1e-6
        );
        assert_eq!(criterion.classification_merit(&cls_pre(), &cls_post2()), 0.0);

        let criterion = InformationGain::new(0.35);
        assert_eq!(criterion.classification_merit(&cls_pre(), &cls_post1()), 0.0);

        let criterion = InformationGain::new(0.0);
        assert!(criterion.classification_merit(&cls_pre(), &cls_post2()) > 0.3);
    }

    #[test]
    fn test_range() {
        let criterion = InformationGain::default();
        assert_eq!(criterion.classification_range(&cls_pre()), 1.0);
        let three = class_stats(&[1.0, 2.0, 3.0]);
        assert_abs_diff_eq!(criterion.classification_range(&three), 1.584963, epsilon = 1e-6);
    }

    #[test]
    fn test_support() {
        let criterion = InformationGain::default();
        assert!(criterion.supports(&Feature::categorical("play", ["yes", "no"])));
        assert!(!criterion.supports(&Feature::numerical("hours")));
        assert_eq!(criterion.regression_merit(&reg_pre(), &reg_post1()), 0.0);
    }
}
