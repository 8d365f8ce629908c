//! Gini impurity criterion for classification.

use super::{clamp_merit, SplitCriterion};
use crate::model::Feature;
use crate::stats::{total_weight, ClassStats, Distribution, StreamStats};

/// Decrease of Gini impurity achieved by a split.
///
/// Merit is `gini(pre) - Σ (w_b / w) · gini(b)` over non-empty branches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GiniImpurity;

impl SplitCriterion for GiniImpurity {
    fn supports(&self, target: &Feature) -> bool {
        target.is_categorical()
    }

    fn classification_range(&self, _pre: &ClassStats) -> f64 {
        1.0
    }

    fn classification_merit(&self, pre: &ClassStats, post: &Distribution<ClassStats>) -> f64 {
        let total = total_weight(post);
        if !(total > 0.0) || post.len() < 2 {
            return 0.0;
        }

        let impurity: f64 = post
            .iter()
            .map(|(_, stats)| stats.weight() / total * stats.gini())
            .sum();
        clamp_merit(pre.gini() - impurity)
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
        assert_abs_diff_eq!(
            GiniImpurity.classification_merit(&cls_pre(), &cls_post1()),
            0.142222,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            GiniImpurity.classification_merit(&cls_pre(), &cls_post2()),
            0.168889,
            epsilon = 1e-6
        );
        assert_eq!(GiniImpurity.classification_merit(&cls_pre(), &cls_post3()), 0.0);
    }

    #[test]
    fn test_pure_split_removes_all_impurity() {
        let pre = class_stats(&[5.0, 5.0]);
        let post = class_dist(&[&[5.0, 0.0], &[0.0, 5.0]]);
        assert_abs_diff_eq!(GiniImpurity.classification_merit(&pre, &post), 0.5, epsilon = 1e-12);
        assert_eq!(GiniImpurity.classification_range(&pre), 1.0);
    }
}
