//! # Hoeffding Rust
//!
//! Streaming decision trees (Very Fast Decision Trees) for classification
//! and regression. A tree learns from one weighted example at a time and
//! only splits a leaf once the Hoeffding bound shows, with a configurable
//! confidence, that the best split would also win on the full stream.
//!
//! ## Features
//!
//! - **Incremental Learning**: Examples are consumed one by one, memory is
//!   bounded by the number of learning leaves and the bucket cap of the
//!   numerical observers.
//! - **Classification and Regression**: The engine is generic over its target
//!   statistics, [`ClassificationTree`] and [`RegressionTree`] are ready-made
//!   aliases.
//! - **Pluggable Criteria**: Information gain, Gini impurity, variance
//!   reduction and gain ratio, or any [`split::SplitCriterion`] of your own.
//! - **Thread Safety**: Trees can be shared between threads, training takes a
//!   write lock and prediction a read lock.
//! - **Persistence**: Trees round-trip through a compact tagged binary stream
//!   and render to text or Graphviz for inspection.
//!
//! ## Quick Start
//!
//! ```rust
//! use hoeffding_rust::{ClassificationTree, ConfigBuilder, Feature, MapExample, Model};
//!
//! # fn main() -> hoeffding_rust::Result<()> {
//! let model = Model::new(vec![
//!     Feature::categorical("play", ["yes", "no"]),
//!     Feature::categorical("outlook", ["rainy", "overcast", "sunny"]),
//!     Feature::numerical("temp"),
//! ])?;
//!
//! let config = ConfigBuilder::new()
//!     .grace_period(2)
//!     .split_confidence(0.1)
//!     .build()?;
//! let tree = ClassificationTree::new(model, "play", config)?;
//!
//! let x = MapExample::new()
//!     .with("play", "no")
//!     .with("outlook", "rainy")
//!     .with("temp", 12.5);
//! tree.train(&x, 1.0);
//!
//! let predictions = tree.predict(&x);
//! assert_eq!(predictions.top(), Some((1, 1.0)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`core`]: Fundamental types, constants, error handling and adaptive storage
//! - [`config`]: Tree growth configuration
//! - [`model`]: Features, models and examples
//! - [`stats`]: Target statistics for classification and regression
//! - [`observer`]: Per-leaf sufficient statistics of the predictors
//! - [`split`]: Split criteria and candidates
//! - [`tree`]: Node arena, pruning and diagnostic export
//! - [`io`]: Binary persistence
//! - [`hoeffding`]: The thread-safe streaming controller

#![doc(html_root_url = "https://docs.rs/hoeffding-rust/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Feature model module
pub mod model;

// Target statistics module
pub mod stats;

// Predictor observers module
pub mod observer;

// Split criteria module
pub mod split;

// Node arena module
pub mod tree;

// Persistence module
pub mod io;

// Streaming controller module
pub mod hoeffding;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{HoeffdingError, Result},
    types::*,
};

// Re-export configuration functionality
pub use crate::config::{Config, ConfigBuilder};

// Re-export model functionality
pub use crate::model::{CategoryStrategy, Example, Feature, MapExample, Model, Value};

// Re-export statistics functionality
pub use crate::stats::{ClassStats, Distribution, StreamStats, TargetStats};

// Re-export split functionality
pub use crate::split::{
    DefaultCriterion, GainRatio, GiniImpurity, InformationGain, SplitCriterion, VarianceReduction,
};

// Re-export tree functionality
pub use crate::tree::{SplitAttemptInfo, Tree, TreeInfo};

// Re-export controller functionality
pub use crate::hoeffding::{
    hoeffding_bound, ClassificationTree, HoeffdingTree, Predictions, RegressionTree,
};

// Version information
pub use crate::core::constants::HOEFFDING_RUST_VERSION as VERSION;
