//! Bounded histogram for numerical predictors.
//!
//! Observations land in buckets sorted by threshold. Once the cap is
//! exceeded, the two adjacent buckets with the closest thresholds are merged,
//! so memory per leaf and feature stays constant however long the stream
//! runs.

use crate::core::constants::DEFAULT_MAX_BUCKETS;
use crate::core::types::is_number;
use crate::stats::{Distribution, StreamStats, TargetStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
struct Bucket<S: TargetStats> {
    threshold: f64,
    min: f64,
    max: f64,
    feature: StreamStats,
    target: S,
}

impl<S: TargetStats> Bucket<S> {
    fn new(value: f64) -> Self {
        Bucket {
            threshold: value,
            min: value,
            max: value,
            feature: StreamStats::new(),
            target: S::default(),
        }
    }

    fn observe(&mut self, value: f64, target: S::Target, weight: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.feature.add(value, weight);
        self.target.observe(target, weight);
    }

    fn absorb(&mut self, other: Bucket<S>) {
        let (w1, w2) = (self.feature.weight(), other.feature.weight());
        if w1 + w2 > 0.0 {
            self.threshold = (self.threshold * w1 + other.threshold * w2) / (w1 + w2);
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.feature.merge(&other.feature);
        self.target.merge(&other.target);
    }

    /// `(lt, eq, gt)` share of the bucket's weight relative to `pivot`.
    fn estimate(&self, pivot: f64) -> (f64, f64, f64) {
        let weight = self.feature.weight();
        if pivot < self.min {
            return (0.0, 0.0, weight);
        }
        if pivot > self.max {
            return (weight, 0.0, 0.0);
        }
        if self.min == self.max {
            return (0.0, weight, 0.0);
        }

        let std_dev = self.feature.std_dev();
        if std_dev > 0.0 && std_dev.is_finite() {
            return self.feature.estimate(pivot);
        }
        let below = (pivot - self.min) / (self.max - self.min) * weight;
        (below, 0.0, weight - below)
    }
}

/// Histogram of predictor values with target stats per bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct NumericalObserver<S: TargetStats> {
    buckets: Vec<Bucket<S>>,
    max_buckets: usize,
}

impl<S: TargetStats> Default for NumericalObserver<S> {
    fn default() -> Self {
        NumericalObserver::new(DEFAULT_MAX_BUCKETS)
    }
}

impl<S: TargetStats> NumericalObserver<S> {
    /// Creates an observer holding at most `max_buckets` buckets (at least 2).
    pub fn new(max_buckets: usize) -> Self {
        NumericalObserver {
            buckets: Vec::new(),
            max_buckets: max_buckets.max(2),
        }
    }

    /// Records `target` for predictor `value`. Non-finite values and
    /// non-positive weights are ignored.
    pub fn observe(&mut self, value: f64, target: S::Target, weight: f64) {
        if !is_number(value) || !(weight > 0.0) || !weight.is_finite() {
            return;
        }

        match self
            .buckets
            .binary_search_by(|b| b.threshold.total_cmp(&value))
        {
            Ok(i) => self.buckets[i].observe(value, target, weight),
            Err(i) => {
                let mut bucket = Bucket::new(value);
                bucket.observe(value, target, weight);
                self.buckets.insert(i, bucket);
                if self.buckets.len() > self.max_buckets {
                    self.merge_closest();
                }
            }
        }
    }

    fn merge_closest(&mut self) {
        let closest = self
            .buckets
            .windows(2)
            .enumerate()
            .map(|(i, pair)| (i, pair[1].threshold - pair[0].threshold))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i);

        if let Some(i) = closest {
            let next = self.buckets.remove(i + 1);
            self.buckets[i].absorb(next);
        }
    }

    /// Number of buckets in use.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket cap.
    pub fn max_buckets(&self) -> usize {
        self.max_buckets
    }

    /// Total observed weight.
    pub fn weight(&self) -> f64 {
        self.buckets.iter().map(|b| b.feature.weight()).sum()
    }

    /// Smallest and largest observed value.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.buckets.iter().fold(None, |acc, b| match acc {
            None => Some((b.min, b.max)),
            Some((lo, hi)) => Some((lo.min(b.min), hi.max(b.max))),
        })
    }

    /// `n` evenly spaced candidate pivots strictly between the observed
    /// minimum and maximum.
    pub fn pivot_points(&self, n: usize) -> Vec<f64> {
        let Some((min, max)) = self.bounds() else {
            return Vec::new();
        };
        if !(max > min) {
            return Vec::new();
        }
        let inc = (max - min) / (n + 1) as f64;
        (0..n)
            .map(|i| min + inc * (i + 1) as f64)
            .filter(|&p| p > min && p < max)
            .collect()
    }

    /// Splits the observed weight into `(lt, eq, gt)` parts around `pivot`.
    pub fn estimate(&self, pivot: f64) -> (f64, f64, f64) {
        self.buckets
            .iter()
            .map(|b| b.estimate(pivot))
            .fold((0.0, 0.0, 0.0), |(lt, eq, gt), (l, e, g)| {
                (lt + l, eq + e, gt + g)
            })
    }

    /// Target stats of the two branches of a binary split at `pivot`.
    ///
    /// Branch 0 receives values below the pivot, branch 1 the rest.
    pub fn post_split(&self, pivot: f64) -> Distribution<S> {
        let mut post = Distribution::<S>::new();
        for bucket in &self.buckets {
            let (lt, eq, gt) = bucket.estimate(pivot);
            let weight = lt + eq + gt;
            if !(weight > 0.0) {
                continue;
            }

            let lower = lt / weight;
            if lower > 0.0 {
                post.get_mut(0).merge(&bucket.target.scaled(lower));
            }
            if lower < 1.0 {
                post.get_mut(1).merge(&bucket.target.scaled(1.0 - lower));
            }
        }
        post
    }
}
