//! Split criteria and split candidates.
//!
//! A [`SplitCriterion`] scores how much better a post-split distribution is
//! than the pre-split stats (its *merit*) and supplies the *range* used as the
//! magnitude in the Hoeffding bound. Criteria are pure and stateless, and are
//! injected into trees through [`crate::config::Config`].

pub mod gain_ratio;
pub mod gini;
pub mod information_gain;
pub mod variance_reduction;

pub use gain_ratio::GainRatio;
pub use gini::GiniImpurity;
pub use information_gain::InformationGain;
pub use variance_reduction::VarianceReduction;

use crate::model::Feature;
use crate::stats::{ClassStats, Distribution, StreamStats, TargetStats};
use std::fmt;
use std::sync::Arc;

/// Scores candidate splits.
///
/// Merits are never negative: implementations return `0.0` for splits that
/// do not qualify and run raw scores through [`clamp_merit`].
pub trait SplitCriterion: fmt::Debug + Send + Sync {
    /// Returns true if the criterion can score splits for `target`.
    fn supports(&self, target: &Feature) -> bool;

    /// Hoeffding range for classification stats.
    fn classification_range(&self, pre: &ClassStats) -> f64;

    /// Merit of a classification split.
    fn classification_merit(&self, pre: &ClassStats, post: &Distribution<ClassStats>) -> f64;

    /// Hoeffding range for regression stats.
    fn regression_range(&self, pre: &StreamStats) -> f64;

    /// Merit of a regression split.
    fn regression_merit(&self, pre: &StreamStats, post: &Distribution<StreamStats>) -> f64;
}

/// Maps negative and NaN scores to zero.
#[inline]
pub fn clamp_merit(merit: f64) -> f64 {
    if merit.is_nan() || merit < 0.0 {
        0.0
    } else {
        merit
    }
}

impl<C: SplitCriterion + ?Sized> SplitCriterion for Box<C> {
    fn supports(&self, target: &Feature) -> bool {
        (**self).supports(target)
    }

    fn classification_range(&self, pre: &ClassStats) -> f64 {
        (**self).classification_range(pre)
    }

    fn classification_merit(&self, pre: &ClassStats, post: &Distribution<ClassStats>) -> f64 {
        (**self).classification_merit(pre, post)
    }

    fn regression_range(&self, pre: &StreamStats) -> f64 {
        (**self).regression_range(pre)
    }

    fn regression_merit(&self, pre: &StreamStats, post: &Distribution<StreamStats>) -> f64 {
        (**self).regression_merit(pre, post)
    }
}

impl<C: SplitCriterion + ?Sized> SplitCriterion for Arc<C> {
    fn supports(&self, target: &Feature) -> bool {
        (**self).supports(target)
    }

    fn classification_range(&self, pre: &ClassStats) -> f64 {
        (**self).classification_range(pre)
    }

    fn classification_merit(&self, pre: &ClassStats, post: &Distribution<ClassStats>) -> f64 {
        (**self).classification_merit(pre, post)
    }

    fn regression_range(&self, pre: &StreamStats) -> f64 {
        (**self).regression_range(pre)
    }

    fn regression_merit(&self, pre: &StreamStats, post: &Distribution<StreamStats>) -> f64 {
        (**self).regression_merit(pre, post)
    }
}

/// Information gain for categorical targets and variance reduction for
/// numerical ones, both with their default parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DefaultCriterion {
    /// Criterion used for classification trees
    pub classification: InformationGain,
    /// Criterion used for regression trees
    pub regression: VarianceReduction,
}

impl SplitCriterion for DefaultCriterion {
    fn supports(&self, target: &Feature) -> bool {
        self.classification.supports(target) || self.regression.supports(target)
    }

    fn classification_range(&self, pre: &ClassStats) -> f64 {
        self.classification.classification_range(pre)
    }

    fn classification_merit(&self, pre: &ClassStats, post: &Distribution<ClassStats>) -> f64 {
        self.classification.classification_merit(pre, post)
    }

    fn regression_range(&self, pre: &StreamStats) -> f64 {
        self.regression.regression_range(pre)
    }

    fn regression_merit(&self, pre: &StreamStats, post: &Distribution<StreamStats>) -> f64 {
        self.regression.regression_merit(pre, post)
    }
}

/// A scored way of splitting a leaf on one feature.
///
/// Candidates are computed during a split attempt and discarded afterwards.
#[derive(Debug, Clone)]
pub struct SplitCandidate<S: TargetStats> {
    /// Predictor feature name
    pub feature: String,
    /// Criterion merit
    pub merit: f64,
    /// Criterion range
    pub range: f64,
    /// Pivot of a numeric binary split
    pub pivot: Option<f64>,
    /// Stats of the leaf at evaluation time
    pub pre_split: S,
    /// Stats each branch would start with
    pub post_split: Distribution<S>,
}
