//! Class weight vectors for classification targets.

use crate::core::sparse_dense::{Slot, SparseDense};
use crate::core::types::Category;
use serde::{Deserialize, Serialize};

/// Accumulated weight per target category.
///
/// Storage adapts between sparse and dense like every other indexed
/// collection; the running total is kept alongside so [`ClassStats::weight`]
/// is exact and O(1).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    weights: SparseDense<f64>,
    total: f64,
}

impl ClassStats {
    /// Creates empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to category `cat`.
    pub fn add(&mut self, cat: Category, weight: f64) {
        if !(weight > 0.0) || !weight.is_finite() {
            return;
        }
        *self.weights.get_mut(cat) += weight;
        self.total += weight;
    }

    /// Weight accumulated for `cat`.
    pub fn get(&self, cat: Category) -> f64 {
        self.weights.get(cat).copied().unwrap_or(0.0)
    }

    /// Total accumulated weight.
    pub fn weight(&self) -> f64 {
        self.total
    }

    /// Number of categories with non-zero weight.
    pub fn num_categories(&self) -> usize {
        self.weights.len()
    }

    /// Probability of `cat`, zero when nothing was observed.
    pub fn probability(&self, cat: Category) -> f64 {
        if self.total > 0.0 {
            self.get(cat) / self.total
        } else {
            0.0
        }
    }

    /// Most likely category and its probability. Ties go to the lower index.
    pub fn top(&self) -> Option<(Category, f64)> {
        let mut best: Option<(Category, f64)> = None;
        for (cat, &w) in self.weights.iter() {
            if best.map_or(true, |(_, bw)| w > bw) {
                best = Some((cat, w));
            }
        }
        best.map(|(cat, w)| (cat, w / self.total))
    }

    /// Shannon entropy in bits.
    pub fn entropy(&self) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        let mut sum = 0.0;
        for (_, &w) in self.weights.iter() {
            if w > 0.0 {
                sum -= w * w.log2();
            }
        }
        (sum + self.total * self.total.log2()) / self.total
    }

    /// Gini impurity, `1 - Σ p²`.
    pub fn gini(&self) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        let squares: f64 = self
            .weights
            .iter()
            .map(|(_, &w)| (w / self.total) * (w / self.total))
            .sum();
        1.0 - squares
    }

    /// Iterates over `(category, weight)` pairs with non-zero weight.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.weights.iter().map(|(cat, &w)| (cat, w))
    }

    /// Adds all weights of `other`.
    pub fn merge(&mut self, other: &ClassStats) {
        for (cat, w) in other.iter() {
            self.add(cat, w);
        }
    }

    /// Copy with every weight multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> ClassStats {
        let mut out = ClassStats::new();
        for (cat, w) in self.iter() {
            out.add(cat, w * factor);
        }
        out
    }

    /// Returns true once the underlying storage has been promoted to dense.
    pub fn is_dense(&self) -> bool {
        self.weights.is_dense()
    }
}

impl Slot for ClassStats {
    fn is_vacant(&self) -> bool {
        self.total == 0.0
    }
}

impl FromIterator<(Category, f64)> for ClassStats {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        let mut stats = ClassStats::new();
        for (cat, w) in iter {
            stats.add(cat, w);
        }
        stats
    }
}
