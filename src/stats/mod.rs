//! Target statistics accumulated by tree nodes.
//!
//! The tree engine is generic over [`TargetStats`]: [`ClassStats`] drives
//! classification trees, [`StreamStats`] drives regression trees. Everything
//! task specific (reading the target, sufficiency, which criterion entry
//! point to call) lives behind this trait.

pub mod class_stats;
pub mod stream_stats;

pub use class_stats::ClassStats;
pub use stream_stats::StreamStats;

use crate::core::sparse_dense::{Slot, SparseDense};
use crate::core::types::{is_number, Category, FeatureKind};
use crate::model::{Example, Feature};
use crate::split::SplitCriterion;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Branch index → target statistics after a (hypothetical) split.
pub type Distribution<S> = SparseDense<S>;

/// Summary of the target values observed at a node.
pub trait TargetStats:
    Slot + fmt::Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// A single target observation.
    type Target: Copy + fmt::Debug;

    /// Feature kind the target must have.
    const TARGET_KIND: FeatureKind;

    /// Reads the target from an example, `None` when it is missing.
    fn target_of(feature: &Feature, x: &dyn Example) -> Option<Self::Target>;

    /// Records a target observation.
    fn observe(&mut self, target: Self::Target, weight: f64);

    /// Total observed weight.
    fn weight(&self) -> f64;

    /// Adds all observations of `other`.
    fn merge(&mut self, other: &Self);

    /// Copy with every observation weight multiplied by `factor`.
    fn scaled(&self, factor: f64) -> Self;

    /// Returns true if the stats justify a split attempt.
    fn is_sufficient(&self) -> bool;

    /// Criterion range for these stats.
    fn range(criterion: &dyn SplitCriterion, pre: &Self) -> f64;

    /// Criterion merit of splitting `pre` into `post`.
    fn merit(criterion: &dyn SplitCriterion, pre: &Self, post: &Distribution<Self>) -> f64;
}

impl TargetStats for ClassStats {
    type Target = Category;

    const TARGET_KIND: FeatureKind = FeatureKind::Categorical;

    fn target_of(feature: &Feature, x: &dyn Example) -> Option<Category> {
        feature.category(x)
    }

    fn observe(&mut self, target: Category, weight: f64) {
        self.add(target, weight);
    }

    fn weight(&self) -> f64 {
        ClassStats::weight(self)
    }

    fn merge(&mut self, other: &Self) {
        ClassStats::merge(self, other);
    }

    fn scaled(&self, factor: f64) -> Self {
        ClassStats::scaled(self, factor)
    }

    fn is_sufficient(&self) -> bool {
        self.num_categories() > 1
    }

    fn range(criterion: &dyn SplitCriterion, pre: &Self) -> f64 {
        criterion.classification_range(pre)
    }

    fn merit(criterion: &dyn SplitCriterion, pre: &Self, post: &Distribution<Self>) -> f64 {
        criterion.classification_merit(pre, post)
    }
}

impl TargetStats for StreamStats {
    type Target = f64;

    const TARGET_KIND: FeatureKind = FeatureKind::Numerical;

    fn target_of(feature: &Feature, x: &dyn Example) -> Option<f64> {
        let value = feature.number(x);
        is_number(value).then_some(value)
    }

    fn observe(&mut self, target: f64, weight: f64) {
        self.add(target, weight);
    }

    fn weight(&self) -> f64 {
        StreamStats::weight(self)
    }

    fn merge(&mut self, other: &Self) {
        StreamStats::merge(self, other);
    }

    fn scaled(&self, factor: f64) -> Self {
        StreamStats::scaled(self, factor)
    }

    fn is_sufficient(&self) -> bool {
        let std_dev = self.std_dev();
        std_dev != 0.0 && !std_dev.is_nan()
    }

    fn range(criterion: &dyn SplitCriterion, pre: &Self) -> f64 {
        criterion.regression_range(pre)
    }

    fn merit(criterion: &dyn SplitCriterion, pre: &Self, post: &Distribution<Self>) -> f64 {
        criterion.regression_merit(pre, post)
    }
}

/// Total weight across all branches of a distribution.
pub fn total_weight<S: TargetStats>(post: &Distribution<S>) -> f64 {
    post.iter().map(|(_, s)| s.weight()).sum()
}

/// Weights of the non-empty branches of a distribution.
pub fn branch_weights<S: TargetStats>(post: &Distribution<S>) -> Vec<f64> {
    post.iter().map(|(_, s)| s.weight()).filter(|&w| w > 0.0).collect()
}
