//! Gain ratio normalisation.

use super::{clamp_merit, SplitCriterion};
use crate::model::Feature;
use crate::stats::{branch_weights, total_weight, ClassStats, Distribution, StreamStats, TargetStats};

/// Divides the merit of an inner criterion by the split information of the
/// branch weights, penalising splits into many small branches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GainRatio<C> {
    /// Criterion producing the raw merit
    pub inner: C,
}

impl<C: SplitCriterion> GainRatio<C> {
    /// Wraps `inner`.
    pub fn new(inner: C) -> Self {
        GainRatio { inner }
    }
}

/// Entropy of the branch weight shares, `-Σ p log2 p`.
fn split_info<S: TargetStats>(post: &Distribution<S>) -> f64 {
    let total = total_weight(post);
    if !(total > 0.0) {
        return 0.0;
    }
    branch_weights(post)
        .into_iter()
        .map(|w| w / total)
        .map(|p| -p * p.log2())
        .sum()
}

fn ratio(merit: f64, info: f64) -> f64 {
    if merit == 0.0 || !(info > 0.0) {
        return 0.0;
    }
    clamp_merit(merit / info)
}

impl<C: SplitCriterion> SplitCriterion for GainRatio<C> {
    fn supports(&self, target: &Feature) -> bool {
        self.inner.supports(target)
    }

    fn classification_range(&self, pre: &ClassStats) -> f64 {
        self.inner.classification_range(pre)
    }

    fn classification_merit(&self, pre: &ClassStats, post: &Distribution<ClassStats>) -> f64 {
        ratio(self.inner.classification_merit(pre, post), split_info(post))
    }

    fn regression_range(&self, pre: &StreamStats) -> f64 {
        self.inner.regression_range(pre)
    }

    fn regression_merit(&self, pre: &StreamStats, post: &Distribution<StreamStats>) -> f64 {
        ratio(self.inner.regression_merit(pre, post), split_info(post))
    }
}
