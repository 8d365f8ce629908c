//! Per-leaf sufficient statistics for predictor features.
//!
//! Every learning leaf keeps one [`FeatureStats`] per predictor. Observers
//! are updated in O(1) amortized time per example and can be asked, at any
//! point, for the best [`SplitCandidate`] on their feature.

pub mod categorical;
pub mod numerical;

pub use categorical::CategoricalObserver;
pub use numerical::NumericalObserver;

use crate::model::{Example, Feature};
use crate::split::{SplitCandidate, SplitCriterion};
use crate::stats::TargetStats;
use serde::{Deserialize, Serialize};

/// Observer for one predictor feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum FeatureStats<S: TargetStats> {
    /// Contingency rows of a categorical predictor
    Categorical(CategoricalObserver<S>),
    /// Bucketed histogram of a numerical predictor
    Numerical(NumericalObserver<S>),
}

impl<S: TargetStats> FeatureStats<S> {
    /// Creates an empty observer matching the kind of `feature`.
    pub fn for_feature(feature: &Feature, max_buckets: usize) -> Self {
        if feature.is_categorical() {
            FeatureStats::Categorical(CategoricalObserver::new())
        } else {
            FeatureStats::Numerical(NumericalObserver::new(max_buckets))
        }
    }

    /// Records the value `feature` takes in `x` against `target`. Missing
    /// and non-finite predictor values are skipped.
    pub fn observe(&mut self, feature: &Feature, x: &dyn Example, target: S::Target, weight: f64) {
        match self {
            FeatureStats::Categorical(observer) => {
                if let Some(cat) = feature.category(x) {
                    observer.observe(cat, target, weight);
                }
            }
            FeatureStats::Numerical(observer) => {
                observer.observe(feature.number(x), target, weight);
            }
        }
    }

    /// Best split on this feature, if any split is possible.
    pub fn evaluate_split(
        &self,
        feature: &str,
        criterion: &dyn SplitCriterion,
        pre: &S,
        num_pivot_points: usize,
    ) -> Option<SplitCandidate<S>> {
        match self {
            FeatureStats::Categorical(observer) => {
                if observer.num_categories() < 2 {
                    return None;
                }
                let post = observer.post_split();
                Some(SplitCandidate {
                    feature: feature.to_string(),
                    merit: S::merit(criterion, pre, &post),
                    range: S::range(criterion, pre),
                    pivot: None,
                    pre_split: pre.clone(),
                    post_split: post,
                })
            }
            FeatureStats::Numerical(observer) => {
                let mut best: Option<SplitCandidate<S>> = None;
                for pivot in observer.pivot_points(num_pivot_points) {
                    let post = observer.post_split(pivot);
                    if post.len() < 2 {
                        continue;
                    }
                    let merit = S::merit(criterion, pre, &post);
                    if best.as_ref().map_or(true, |b| merit > b.merit) {
                        best = Some(SplitCandidate {
                            feature: feature.to_string(),
                            merit,
                            range: S::range(criterion, pre),
                            pivot: Some(pivot),
                            pre_split: pre.clone(),
                            post_split: post,
                        });
                    }
                }
                best
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MapExample;
    use crate::split::{DefaultCriterion, VarianceReduction};
    use crate::stats::{ClassStats, StreamStats};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_categorical_candidate() {
        let outlook = Feature::categorical("outlook", ["rainy", "overcast", "sunny"]);
        let mut stats: FeatureStats<ClassStats> = FeatureStats::for_feature(&outlook, 12);
        let mut pre = ClassStats::new();

        for (value, target) in [("rainy", 1), ("rainy", 1), ("overcast", 0), ("sunny", 0)] {
            stats.observe(&outlook, &MapExample::new().with("outlook", value), target, 1.0);
            pre.add(target, 1.0);
        }
        stats.observe(&outlook, &MapExample::new(), 0, 1.0);

        let candidate = stats
            .evaluate_split("outlook", &DefaultCriterion::default(), &pre, 11)
            .unwrap();
        assert_eq!(candidate.feature, "outlook");
        assert_eq!(candidate.pivot, None);
        assert_eq!(candidate.post_split.len(), 3);
        assert_abs_diff_eq!(candidate.merit, 1.0, epsilon = 1e-12);
        assert_eq!(candidate.range, 1.0);
    }

    #[test]
    fn test_single_category_has_no_candidate() {
        let outlook = Feature::categorical("outlook", ["rainy", "overcast", "sunny"]);
        let mut stats: FeatureStats<ClassStats> = FeatureStats::for_feature(&outlook, 12);
        let mut pre = ClassStats::new();
        for target in [0, 1] {
            stats.observe(&outlook, &MapExample::new().with("outlook", "sunny"), target, 1.0);
            pre.add(target, 1.0);
        }
        assert!(stats
            .evaluate_split("outlook", &DefaultCriterion::default(), &pre, 11)
            .is_none());
    }

    #[test]
    fn test_numerical_candidate_picks_first_best_pivot() {
        let x = Feature::numerical("x");
        let mut stats: FeatureStats<ClassStats> = FeatureStats::for_feature(&x, 12);
        let mut pre = ClassStats::new();
        for (value, target) in [(1.0, 0), (2.0, 0), (8.0, 1), (9.0, 1)] {
            stats.observe(&x, &MapExample::new().with("x", value), target, 1.0);
            pre.add(target, 1.0);
        }

        let candidate = stats
            .evaluate_split("x", &DefaultCriterion::default(), &pre, 11)
            .unwrap();
        assert_abs_diff_eq!(candidate.merit, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(candidate.pivot.unwrap(), 1.0 + 2.0 * 8.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_numerical_regression_candidate() {
        let x = Feature::numerical("x");
        let mut stats: FeatureStats<StreamStats> = FeatureStats::for_feature(&x, 12);
        let mut pre = StreamStats::new();
        for i in 0..40 {
            let value = i as f64;
            let target = if value < 20.0 { 1.0 } else { 10.0 };
            stats.observe(&x, &MapExample::new().with("x", value), target, 1.0);
            pre.add(target, 1.0);
        }

        let candidate = stats
            .evaluate_split("x", &VarianceReduction::default(), &pre, 11)
            .unwrap();
        let pivot = candidate.pivot.unwrap();
        assert!(pivot > 0.0 && pivot < 39.0);
        assert!(candidate.merit > 0.0);
        assert_eq!(candidate.post_split.len(), 2);
    }

    #[test]
    fn test_constant_numerical_feature_has_no_candidate() {
        let x = Feature::numerical("x");
        let mut stats: FeatureStats<ClassStats> = FeatureStats::for_feature(&x, 12);
        let mut pre = ClassStats::new();
        for target in [0, 1, 0] {
            stats.observe(&x, &MapExample::new().with("x", 3), target, 1.0);
            pre.add(target, 1.0);
        }
        assert!(stats
            .evaluate_split("x", &DefaultCriterion::default(), &pre, 11)
            .is_none());
    }
}
