//! Core infrastructure module for Hoeffding Rust.
//!
//! # Organization
//!
//! - [`types`]: Fundamental type aliases and enumerations
//! - [`constants`]: Configuration defaults and storage thresholds
//! - [`error`]: Error type and `Result` alias
//! - [`sparse_dense`]: Adaptive sparse/dense storage shared by nodes and statistics
//!
//! ```rust
//! use hoeffding_rust::core::{
//!     constants::DEFAULT_GRACE_PERIOD,
//!     error::{HoeffdingError, Result},
//!     sparse_dense::SparseDense,
//! };
//!
//! let mut weights: SparseDense<f64> = SparseDense::new();
//! *weights.get_mut(3) += 1.5;
//! assert_eq!(weights.get(3), Some(&1.5));
//! assert_eq!(DEFAULT_GRACE_PERIOD, 200);
//! # Ok::<(), HoeffdingError>(())
//! ```

pub mod constants;
pub mod error;
pub mod sparse_dense;
pub mod types;

pub use constants::*;
pub use error::{HoeffdingError, Result};
pub use sparse_dense::{should_densify, Slot, SparseDense};
pub use types::*;
