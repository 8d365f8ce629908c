//! Features map raw example values to categories or numbers.

use crate::core::constants::MAX_IDENTITY_CATEGORY;
use crate::core::types::{Category, FeatureKind};
use crate::model::example::{Example, Value};
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;

/// How a categorical feature assigns categories to values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryStrategy {
    /// Category is the position of the value in a fixed vocabulary
    Vocabulary,
    /// Vocabulary first, unknown values hash into `n` buckets after it
    HashBuckets(u32),
    /// Non-negative integer values are used as categories directly
    Identity,
    /// Vocabulary that grows on first sight of a value
    Expandable,
}

/// A named input or target of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature name, unique within a model
    pub name: String,
    /// Categorical or numerical
    pub kind: FeatureKind,
    /// Category assignment; ignored for numerical features
    pub strategy: CategoryStrategy,
    /// Known values of a categorical feature
    pub vocabulary: Vec<String>,
}

impl Feature {
    /// Categorical feature with a fixed vocabulary.
    pub fn categorical<N, I, S>(name: N, vocabulary: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Feature {
            name: name.into(),
            kind: FeatureKind::Categorical,
            strategy: CategoryStrategy::Vocabulary,
            vocabulary: vocabulary.into_iter().map(Into::into).collect(),
        }
    }

    /// Categorical feature that hashes values outside its vocabulary into
    /// `buckets` extra categories.
    pub fn hash_buckets<N, I, S>(name: N, vocabulary: I, buckets: u32) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Feature {
            strategy: CategoryStrategy::HashBuckets(buckets),
            ..Feature::categorical(name, vocabulary)
        }
    }

    /// Categorical feature whose integer values are the categories.
    pub fn identity<N: Into<String>>(name: N) -> Self {
        Feature {
            name: name.into(),
            kind: FeatureKind::Categorical,
            strategy: CategoryStrategy::Identity,
            vocabulary: Vec::new(),
        }
    }

    /// Categorical feature with a growing vocabulary.
    pub fn expandable<N, I, S>(name: N, vocabulary: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Feature {
            strategy: CategoryStrategy::Expandable,
            ..Feature::categorical(name, vocabulary)
        }
    }

    /// Numerical feature.
    pub fn numerical<N: Into<String>>(name: N) -> Self {
        Feature {
            name: name.into(),
            kind: FeatureKind::Numerical,
            strategy: CategoryStrategy::Identity,
            vocabulary: Vec::new(),
        }
    }

    /// Returns true for categorical features.
    pub fn is_categorical(&self) -> bool {
        self.kind.is_categorical()
    }

    /// Returns true for numerical features.
    pub fn is_numerical(&self) -> bool {
        self.kind.is_numerical()
    }

    /// Category of the example's value, `None` when missing or unmapped.
    pub fn category(&self, x: &dyn Example) -> Option<Category> {
        if !self.is_categorical() {
            return None;
        }
        let value = x.get(&self.name)?;

        match self.strategy {
            CategoryStrategy::Vocabulary | CategoryStrategy::Expandable => {
                self.vocabulary_index(value)
            }
            CategoryStrategy::HashBuckets(buckets) => {
                self.vocabulary_index(value).or_else(|| {
                    if buckets == 0 {
                        return None;
                    }
                    let bucket = hash_value(&value.to_string()) % u64::from(buckets);
                    Some(self.vocabulary.len() + bucket as usize)
                })
            }
            CategoryStrategy::Identity => identity_category(value),
        }
    }

    /// Numeric reading of the example's value, `NaN` when missing.
    pub fn number(&self, x: &dyn Example) -> f64 {
        if !self.is_numerical() {
            return f64::NAN;
        }
        x.get(&self.name).map_or(f64::NAN, Value::as_number)
    }

    /// Human-readable value of a category.
    pub fn value_of(&self, cat: Category) -> Option<String> {
        match self.strategy {
            CategoryStrategy::Identity => Some(cat.to_string()),
            CategoryStrategy::HashBuckets(buckets) if cat >= self.vocabulary.len() => {
                let bucket = cat - self.vocabulary.len();
                (bucket < buckets as usize).then(|| format!("#{}", bucket))
            }
            _ => self.vocabulary.get(cat).cloned(),
        }
    }

    fn vocabulary_index(&self, value: &Value) -> Option<Category> {
        let text = value.to_string();
        self.vocabulary.iter().position(|v| *v == text)
    }
}

fn identity_category(value: &Value) -> Option<Category> {
    let cat = match value {
        Value::Integer(i) => usize::try_from(*i).ok(),
        Value::Number(n)
            if n.is_finite()
                && *n >= 0.0
                && n.fract() == 0.0
                && *n <= MAX_IDENTITY_CATEGORY as f64 =>
        {
            Some(*n as usize)
        }
        Value::Bool(b) => Some(usize::from(*b)),
        Value::Text(s) => s.trim().parse().ok(),
        Value::Number(_) => None,
    };
    cat.filter(|&c| c <= MAX_IDENTITY_CATEGORY)
}

fn hash_value(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(text.as_bytes());
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::example::MapExample;

    #[test]
    fn test_vocabulary_category() {
        let feat = Feature::categorical("outlook", ["rainy", "overcast", "sunny"]);
        let x = MapExample::new().with("outlook", "sunny");
        assert_eq!(feat.category(&x), Some(2));

        let x = MapExample::new().with("outlook", "foggy");
        assert_eq!(feat.category(&x), None);
        assert_eq!(feat.category(&MapExample::new()), None);
        assert_eq!(feat.value_of(1).as_deref(), Some("overcast"));
        assert_eq!(feat.value_of(3), None);
    }

    #[test]
    fn test_vocabulary_matches_non_text_values() {
        let feat = Feature::categorical("windy", ["true", "false"]);
        let x = MapExample::new().with("windy", false);
        assert_eq!(feat.category(&x), Some(1));
    }

    #[test]
    fn test_hash_buckets_are_stable() {
        let feat = Feature::hash_buckets("city", ["london"], 8);
        let x = MapExample::new().with("city", "london");
        assert_eq!(feat.category(&x), Some(0));

        let x = MapExample::new().with("city", "paris");
        let cat = feat.category(&x).unwrap();
        assert!((1..9).contains(&cat));
        assert_eq!(feat.category(&x), Some(cat));
        assert_eq!(feat.value_of(cat), Some(format!("#{}", cat - 1)));

        let none = Feature::hash_buckets("city", ["london"], 0);
        assert_eq!(none.category(&x), None);
    }

    #[test]
    fn test_identity_category() {
        let feat = Feature::identity("bucket");
        assert_eq!(feat.category(&MapExample::new().with("bucket", 4)), Some(4));
        assert_eq!(feat.category(&MapExample::new().with("bucket", 3.0)), Some(3));
        assert_eq!(feat.category(&MapExample::new().with("bucket", "12")), Some(12));
        assert_eq!(feat.category(&MapExample::new().with("bucket", -1)), None);
        assert_eq!(feat.category(&MapExample::new().with("bucket", 1.5)), None);
        assert_eq!(feat.value_of(7).as_deref(), Some("7"));
    }

    #[test]
    fn test_identity_rejects_out_of_range_values() {
        let feat = Feature::identity("bucket");
        let limit = MAX_IDENTITY_CATEGORY;
        assert_eq!(feat.category(&MapExample::new().with("bucket", limit as f64)), Some(limit));
        assert_eq!(feat.category(&MapExample::new().with("bucket", 1e20)), None);
        assert_eq!(feat.category(&MapExample::new().with("bucket", f64::INFINITY)), None);
        assert_eq!(feat.category(&MapExample::new().with("bucket", f64::NAN)), None);
        assert_eq!(feat.category(&MapExample::new().with("bucket", i64::MAX)), None);
        assert_eq!(
            feat.category(&MapExample::new().with("bucket", "18446744073709551615")),
            None
        );
    }

    #[test]
    fn test_number() {
        let feat = Feature::numerical("humidex");
        assert_eq!(feat.number(&MapExample::new().with("humidex", 61)), 61.0);
        assert_eq!(feat.number(&MapExample::new().with("humidex", 35.5)), 35.5);
        assert!(feat.number(&MapExample::new()).is_nan());
        assert!(feat.number(&MapExample::new().with("humidex", "n/a")).is_nan());
        assert_eq!(feat.category(&MapExample::new().with("humidex", 61)), None);
    }
}
