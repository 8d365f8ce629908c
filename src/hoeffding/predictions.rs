//! Prediction results.

use crate::core::types::Category;
use crate::stats::{ClassStats, StreamStats, TargetStats};

/// Stats of every node visited while routing an example, root first.
///
/// The last entry comes from the deepest node reached and is the most
/// specific prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions<S: TargetStats> {
    path: Vec<S>,
}

impl<S: TargetStats> Predictions<S> {
    pub(crate) fn new(path: Vec<S>) -> Self {
        Predictions { path }
    }

    /// Stats of the deepest node reached.
    pub fn best(&self) -> Option<&S> {
        self.path.last()
    }

    /// Number of visited nodes.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Returns true if no node was visited.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Visited stats, root first.
    pub fn iter(&self) -> impl Iterator<Item = &S> + '_ {
        self.path.iter()
    }

    /// Visited stats as a slice.
    pub fn as_slice(&self) -> &[S] {
        &self.path
    }
}

impl Predictions<ClassStats> {
    /// Probability of `cat` at the deepest node.
    pub fn probability(&self, cat: Category) -> f64 {
        self.best().map_or(0.0, |stats| stats.probability(cat))
    }

    /// Most likely category at the deepest node.
    pub fn top(&self) -> Option<(Category, f64)> {
        self.best().and_then(ClassStats::top)
    }
}

impl Predictions<StreamStats> {
    /// Mean target at the deepest node, `NaN` when unknown.
    pub fn mean(&self) -> f64 {
        self.best().map_or(f64::NAN, StreamStats::mean)
    }

    /// Target variance at the deepest node, `NaN` when unknown.
    pub fn variance(&self) -> f64 {
        self.best().map_or(f64::NAN, StreamStats::variance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_predictions() {
        let root: ClassStats = vec![(0, 9.0), (1, 5.0)].into_iter().collect();
        let leaf: ClassStats = vec![(0, 2.0), (1, 3.0)].into_iter().collect();
        let predictions = Predictions::new(vec![root, leaf.clone()]);

        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions.best(), Some(&leaf));
        assert_eq!(predictions.probability(1), 0.6);
        assert_eq!(predictions.top(), Some((1, 0.6)));

        let empty: Predictions<ClassStats> = Predictions::new(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.probability(0), 0.0);
        assert_eq!(empty.top(), None);
    }

    #[test]
    fn test_regression_predictions() {
        let leaf: StreamStats = vec![2.0, 4.0, 6.0].into_iter().collect();
        let predictions = Predictions::new(vec![leaf]);
        assert_eq!(predictions.mean(), 4.0);
        assert_eq!(predictions.variance(), 4.0);
        assert!(Predictions::<StreamStats>::new(Vec::new()).mean().is_nan());
    }
}
