//! Streaming moments for regression targets and numeric predictors.

use crate::core::sparse_dense::Slot;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Weighted count, sum and sum of squares of a number stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamStats {
    weight: f64,
    sum: f64,
    sum_squares: f64,
}

impl StreamStats {
    /// Creates empty moments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds moments from raw parts.
    pub fn from_parts(weight: f64, sum: f64, sum_squares: f64) -> Self {
        StreamStats {
            weight,
            sum,
            sum_squares,
        }
    }

    /// Adds `value` with `weight`. Non-finite values and non-positive
    /// weights are ignored.
    pub fn add(&mut self, value: f64, weight: f64) {
        if !value.is_finite() || !(weight > 0.0) || !weight.is_finite() {
            return;
        }
        self.weight += weight;
        self.sum += value * weight;
        self.sum_squares += value * value * weight;
    }

    /// Total weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Weighted sum.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Weighted sum of squares.
    pub fn sum_squares(&self) -> f64 {
        self.sum_squares
    }

    /// Weighted mean, `NaN` when empty.
    pub fn mean(&self) -> f64 {
        if self.weight > 0.0 {
            self.sum / self.weight
        } else {
            f64::NAN
        }
    }

    /// Sample variance, `NaN` for a weight of one or less.
    pub fn variance(&self) -> f64 {
        if self.weight <= 1.0 {
            return f64::NAN;
        }
        let variance = (self.sum_squares - self.sum * self.sum / self.weight) / (self.weight - 1.0);
        variance.max(0.0)
    }

    /// Sample standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Adds all moments of `other`.
    pub fn merge(&mut self, other: &StreamStats) {
        self.weight += other.weight;
        self.sum += other.sum;
        self.sum_squares += other.sum_squares;
    }

    /// Copy with all moments multiplied by `factor`. The mean is preserved;
    /// the sample variance is not, since its denominator is `weight - 1`.
    pub fn scaled(&self, factor: f64) -> StreamStats {
        StreamStats {
            weight: self.weight * factor,
            sum: self.sum * factor,
            sum_squares: self.sum_squares * factor,
        }
    }

    /// Splits the weight into `(less, equal, greater)` parts relative to
    /// `value`, assuming the stream is normally distributed.
    ///
    /// The three parts always add up to [`StreamStats::weight`]. Streams
    /// without a usable deviation are treated as a point mass at the mean.
    pub fn estimate(&self, value: f64) -> (f64, f64, f64) {
        let weight = self.weight;
        if !(weight > 0.0) {
            return (0.0, 0.0, 0.0);
        }

        match Normal::new(self.mean(), self.std_dev()) {
            Ok(normal) => {
                let below = normal.cdf(value) * weight;
                let equal = (normal.pdf(value) * weight).min(below);
                (below - equal, equal, weight - below)
            }
            Err(_) => {
                let mean = self.mean();
                if value < mean {
                    (0.0, 0.0, weight)
                } else if value > mean {
                    (weight, 0.0, 0.0)
                } else {
                    (0.0, weight, 0.0)
                }
            }
        }
    }
}

impl Slot for StreamStats {
    fn is_vacant(&self) -> bool {
        self.weight == 0.0
    }
}

impl FromIterator<f64> for StreamStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = StreamStats::new();
        for value in iter {
            stats.add(value, 1.0);
        }
        stats
    }
}
