//! System constants and default configuration values for Hoeffding Rust.
//!
//! Every tunable in [`crate::config::Config`] takes its default from here so
//! the builder, the file loaders and the documentation agree.

/// Default number of observations a leaf must receive between two
/// consecutive split attempts.
pub const DEFAULT_GRACE_PERIOD: usize = 200;

/// Default number of training cycles between automatic pruning passes.
/// Zero disables automatic pruning.
pub const DEFAULT_PRUNE_PERIOD: usize = 100_000;

/// Default cap on the number of leaves that keep accumulating feature
/// statistics.
pub const DEFAULT_MAX_LEARNING_NODES: usize = 1_000_000;

/// Default probability of choosing the wrong split (δ in the Hoeffding bound).
pub const DEFAULT_SPLIT_CONFIDENCE: f64 = 1e-7;

/// Default bound below which near-tied candidates are split anyway.
pub const DEFAULT_TIE_THRESHOLD: f64 = 0.05;

/// Default number of candidate pivots evaluated per numerical feature.
pub const DEFAULT_NUM_PIVOT_POINTS: usize = 11;

/// Default bucket cap of a numerical observer.
pub const DEFAULT_MAX_BUCKETS: usize = 12;

/// Smallest accepted bucket cap of a numerical observer.
pub const MIN_BUCKETS: usize = 2;

/// Largest accepted bucket cap of a numerical observer.
pub const MAX_BUCKETS: usize = 64;

/// Default minimum fraction of total weight a branch must carry to count
/// towards an information-gain split.
pub const DEFAULT_MIN_BRANCH_FRACTION: f64 = 0.1;

/// Default minimum weight a branch must carry to count towards a
/// variance-reduction split.
pub const DEFAULT_MIN_BRANCH_WEIGHT: f64 = 4.0;

/// Sparse storage is promoted to dense once more than this many slots are
/// occupied (and the density condition holds).
pub const DENSE_MIN_OCCUPIED: usize = 20;

/// Sparse storage is promoted to dense once `occupied * DENSE_RATIO` exceeds
/// the addressed capacity.
pub const DENSE_RATIO: usize = 12;

/// Largest category an identity feature maps a value to. Larger values
/// are treated as missing.
pub const MAX_IDENTITY_CATEGORY: usize = u32::MAX as usize;

/// Environment variable prefix used by [`crate::config::Config::load_from_environment`].
pub const ENV_PREFIX: &str = "HOEFFDING_";

/// Library version
pub const HOEFFDING_RUST_VERSION: &str = env!("CARGO_PKG_VERSION");
