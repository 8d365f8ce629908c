//! Core configuration structure and builder for Hoeffding trees.
//!
//! A [`Config`] is immutable once handed to a tree. It can be assembled
//! through [`ConfigBuilder`], loaded from JSON or TOML files, or read from
//! `HOEFFDING_*` environment variables.

use crate::core::constants::*;
use crate::core::error::{HoeffdingError, Result};
use crate::{config_error, ensure};
use crate::split::{DefaultCriterion, SplitCriterion};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

fn default_split_criterion() -> Arc<dyn SplitCriterion> {
    Arc::new(DefaultCriterion::default())
}

/// Tree growth configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Weight a leaf must gain between two split attempts
    pub grace_period: usize,
    /// Allowed probability of choosing the wrong split (δ)
    pub split_confidence: f64,
    /// Hoeffding bound below which near-tied candidates are split anyway
    pub tie_threshold: f64,
    /// Training cycles between pruning passes (0 = never)
    pub prune_period: usize,
    /// Leaves allowed to keep learning after a pruning pass
    pub max_learning_nodes: usize,
    /// Candidate pivots evaluated per numerical feature
    pub num_pivot_points: usize,
    /// Bucket cap of numerical observers
    pub max_buckets: usize,
    /// Criterion scoring split candidates
    #[serde(skip, default = "default_split_criterion")]
    pub split_criterion: Arc<dyn SplitCriterion>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grace_period: DEFAULT_GRACE_PERIOD,
            split_confidence: DEFAULT_SPLIT_CONFIDENCE,
            tie_threshold: DEFAULT_TIE_THRESHOLD,
            prune_period: DEFAULT_PRUNE_PERIOD,
            max_learning_nodes: DEFAULT_MAX_LEARNING_NODES,
            num_pivot_points: DEFAULT_NUM_PIVOT_POINTS,
            max_buckets: DEFAULT_MAX_BUCKETS,
            split_criterion: default_split_criterion(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grace_period > 0,
            HoeffdingError::invalid_parameter(
                "grace_period",
                self.grace_period.to_string(),
                "must be greater than 0",
            )
        );

        ensure!(
            self.split_confidence > 0.0 && self.split_confidence < 1.0,
            HoeffdingError::invalid_parameter(
                "split_confidence",
                self.split_confidence.to_string(),
                "must be in range (0.0, 1.0)",
            )
        );

        ensure!(
            self.tie_threshold >= 0.0,
            HoeffdingError::invalid_parameter(
                "tie_threshold",
                self.tie_threshold.to_string(),
                "must be non-negative",
            )
        );

        ensure!(
            self.max_learning_nodes > 0,
            HoeffdingError::invalid_parameter(
                "max_learning_nodes",
                self.max_learning_nodes.to_string(),
                "must be greater than 0",
            )
        );

        ensure!(
            self.num_pivot_points > 0,
            HoeffdingError::invalid_parameter(
                "num_pivot_points",
                self.num_pivot_points.to_string(),
                "must be at least 1",
            )
        );

        ensure!(
            (MIN_BUCKETS..=MAX_BUCKETS).contains(&self.max_buckets),
            HoeffdingError::invalid_parameter(
                "max_buckets",
                self.max_buckets.to_string(),
                format!("must be in range [{}, {}]", MIN_BUCKETS, MAX_BUCKETS),
            )
        );

        Ok(())
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error!("Failed to read config file: {}", e))?;

        let config: Config = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| config_error!("Failed to parse JSON config: {}", e))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| config_error!("Failed to parse TOML config: {}", e))?,
            _ => {
                return Err(HoeffdingError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| config_error!("Failed to serialize to JSON: {}", e))?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| config_error!("Failed to serialize to TOML: {}", e))?,
            _ => {
                return Err(HoeffdingError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)
            .map_err(|e| config_error!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn load_from_environment() -> Result<Self> {
        let mut config = Config::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Apply `HOEFFDING_*` environment variable overrides
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        if let Some(val) = env_override("GRACE_PERIOD")? {
            self.grace_period = val;
        }
        if let Some(val) = env_override("SPLIT_CONFIDENCE")? {
            self.split_confidence = val;
        }
        if let Some(val) = env_override("TIE_THRESHOLD")? {
            self.tie_threshold = val;
        }
        if let Some(val) = env_override("PRUNE_PERIOD")? {
            self.prune_period = val;
        }
        if let Some(val) = env_override("MAX_LEARNING_NODES")? {
            self.max_learning_nodes = val;
        }
        if let Some(val) = env_override("NUM_PIVOT_POINTS")? {
            self.num_pivot_points = val;
        }
        if let Some(val) = env_override("MAX_BUCKETS")? {
            self.max_buckets = val;
        }

        self.validate()
    }

    /// Returns true if automatic pruning is enabled
    pub fn is_pruning_enabled(&self) -> bool {
        self.prune_period > 0
    }
}

fn env_override<T: FromStr>(name: &str) -> Result<Option<T>> {
    let key = format!("{}{}", ENV_PREFIX, name);
    match std::env::var(&key) {
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| config_error!("Invalid {}", key)),
        Err(_) => Ok(None),
    }
}

/// Configuration builder for fluent configuration creation
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
    validation_errors: Vec<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the grace period
    pub fn grace_period(mut self, weight: usize) -> Self {
        if weight == 0 {
            self.validation_errors
                .push("grace_period must be greater than 0".to_string());
        }
        self.config.grace_period = weight;
        self
    }

    /// Set the split confidence
    pub fn split_confidence(mut self, delta: f64) -> Self {
        if !(delta > 0.0 && delta < 1.0) {
            self.validation_errors
                .push("split_confidence must be in range (0.0, 1.0)".to_string());
        }
        self.config.split_confidence = delta;
        self
    }

    /// Set the tie threshold
    pub fn tie_threshold(mut self, threshold: f64) -> Self {
        if !(threshold >= 0.0) {
            self.validation_errors
                .push("tie_threshold must be non-negative".to_string());
        }
        self.config.tie_threshold = threshold;
        self
    }

    /// Set the prune period, 0 disables automatic pruning
    pub fn prune_period(mut self, cycles: usize) -> Self {
        self.config.prune_period = cycles;
        self
    }

    /// Set the maximum number of learning leaves
    pub fn max_learning_nodes(mut self, nodes: usize) -> Self {
        if nodes == 0 {
            self.validation_errors
                .push("max_learning_nodes must be greater than 0".to_string());
        }
        self.config.max_learning_nodes = nodes;
        self
    }

    /// Set the number of pivot points per numerical feature
    pub fn num_pivot_points(mut self, points: usize) -> Self {
        self.config.num_pivot_points = points;
        self
    }

    /// Set the bucket cap of numerical observers
    pub fn max_buckets(mut self, buckets: usize) -> Self {
        self.config.max_buckets = buckets;
        self
    }

    /// Set the split criterion
    pub fn split_criterion<C: SplitCriterion + 'static>(mut self, criterion: C) -> Self {
        self.config.split_criterion = Arc::new(criterion);
        self
    }

    /// Set a shared split criterion
    pub fn shared_split_criterion(mut self, criterion: Arc<dyn SplitCriterion>) -> Self {
        self.config.split_criterion = criterion;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        if !self.validation_errors.is_empty() {
            return Err(config_error!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            ));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
