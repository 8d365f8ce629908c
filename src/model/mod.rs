//! Feature model consumed by the tree engine.
//!
//! A [`Model`] is an ordered set of uniquely named [`Feature`]s. The tree
//! only ever reads from it: it asks features for the category or number an
//! [`Example`] carries, and never creates or changes features itself.

pub mod example;
pub mod feature;

pub use example::{Example, MapExample, Value};
pub use feature::{CategoryStrategy, Feature};

use crate::core::error::{HoeffdingError, Result};
use serde::{Deserialize, Serialize};

/// Ordered set of features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    features: Vec<Feature>,
}

impl Model {
    /// Creates a model, rejecting duplicate feature names.
    pub fn new<I: IntoIterator<Item = Feature>>(features: I) -> Result<Self> {
        let features: Vec<Feature> = features.into_iter().collect();
        for (i, feature) in features.iter().enumerate() {
            if features[..i].iter().any(|f| f.name == feature.name) {
                return Err(HoeffdingError::invalid_parameter(
                    "features",
                    feature.name.clone(),
                    "feature names must be unique",
                ));
            }
        }
        Ok(Model { features })
    }

    /// Looks up a feature by name.
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }

    /// All features in declaration order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// All features except `target`.
    pub fn predictors<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Feature> + 'a {
        self.features.iter().filter(move |f| f.name != target)
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the model has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
