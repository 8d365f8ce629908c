//! Contingency rows for categorical predictors.

use crate::core::types::Category;
use crate::stats::{Distribution, TargetStats};
use serde::{Deserialize, Serialize};

/// Target stats per predictor category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CategoricalObserver<S: TargetStats> {
    rows: Distribution<S>,
}

impl<S: TargetStats> Default for CategoricalObserver<S> {
    fn default() -> Self {
        CategoricalObserver {
            rows: Distribution::new(),
        }
    }
}

impl<S: TargetStats> CategoricalObserver<S> {
    /// Creates an empty observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `target` for predictor category `cat`.
    pub fn observe(&mut self, cat: Category, target: S::Target, weight: f64) {
        if !(weight > 0.0) || !weight.is_finite() {
            return;
        }
        self.rows.get_mut(cat).observe(target, weight);
    }

    /// Number of predictor categories seen so far.
    pub fn num_categories(&self) -> usize {
        self.rows.len()
    }

    /// Stats for a single predictor category.
    pub fn row(&self, cat: Category) -> Option<&S> {
        self.rows.get(cat)
    }

    /// Distribution produced by splitting on every category.
    pub fn post_split(&self) -> Distribution<S> {
        self.rows.clone()
    }
}
