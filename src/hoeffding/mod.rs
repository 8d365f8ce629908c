//! Thread-safe Hoeffding tree controller.
//!
//! [`HoeffdingTree`] owns a [`Tree`] arena behind a [`RwLock`] and drives
//! the streaming algorithm: every call to [`HoeffdingTree::train`] routes an
//! example to its leaf, records it there and, once the leaf has gained
//! enough weight, checks whether the best split beats the runner-up by more
//! than the Hoeffding bound.
//!
//! ```rust
//! use hoeffding_rust::{ClassificationTree, Config, Feature, MapExample, Model};
//!
//! let model = Model::new(vec![
//!     Feature::categorical("play", ["yes", "no"]),
//!     Feature::categorical("outlook", ["rainy", "overcast", "sunny"]),
//! ])?;
//! let tree = ClassificationTree::new(model, "play", Config::default())?;
//!
//! tree.train(&MapExample::new().with("play", "yes").with("outlook", "sunny"), 1.0);
//! let predictions = tree.predict(&MapExample::new().with("outlook", "sunny"));
//! assert_eq!(predictions.top(), Some((0, 1.0)));
//! # Ok::<(), hoeffding_rust::HoeffdingError>(())
//! ```

pub mod predictions;

pub use predictions::Predictions;

use crate::config::Config;
use crate::core::error::{HoeffdingError, Result};
use crate::core::types::NodeRef;
use crate::model::{CategoryStrategy, Example, Model};
use crate::split::SplitCandidate;
use crate::stats::{ClassStats, StreamStats, TargetStats};
use crate::tree::{Node, NodeKind, Position, SplitAttemptInfo, Tree, TreeInfo};
use log::{debug, info, warn};
use static_assertions::assert_impl_all;
use std::io::{Read, Write};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Hoeffding tree over a categorical target.
pub type ClassificationTree = HoeffdingTree<ClassStats>;

/// Hoeffding tree over a numerical target.
pub type RegressionTree = HoeffdingTree<StreamStats>;

assert_impl_all!(ClassificationTree: Send, Sync);
assert_impl_all!(RegressionTree: Send, Sync);

/// Hoeffding bound `sqrt(range² · ln(1/δ) / (2·weight))`.
pub fn hoeffding_bound(range: f64, confidence: f64, weight: f64) -> f64 {
    (range * range * (1.0 / confidence).ln() / (2.0 * weight)).sqrt()
}

/// A split is taken when the best candidate clearly wins, or when the bound
/// is so tight that the leading candidates are practically tied.
#[inline]
fn should_split(merit_gain: f64, bound: f64, tie_threshold: f64) -> bool {
    merit_gain > bound || bound < tie_threshold
}

#[derive(Debug)]
struct State<S: TargetStats> {
    tree: Tree<S>,
    cycles: u64,
}

/// Incrementally grown decision tree.
#[derive(Debug)]
pub struct HoeffdingTree<S: TargetStats> {
    config: Config,
    state: RwLock<State<S>>,
}

impl<S: TargetStats> HoeffdingTree<S> {
    /// Creates a tree with a single empty root leaf.
    pub fn new(model: Model, target: &str, config: Config) -> Result<Self> {
        config.validate()?;
        Self::check_model(&model, target, &config)?;

        Ok(HoeffdingTree {
            config,
            state: RwLock::new(State {
                tree: Tree::new(model, target),
                cycles: 0,
            }),
        })
    }

    /// Reads a tree previously written with [`HoeffdingTree::write_to`].
    pub fn load<R: Read>(r: R, config: Config) -> Result<Self> {
        config.validate()?;
        let (tree, bytes) = Tree::<S>::read_from(r)?;
        Self::check_model(&tree.model, &tree.target, &config)?;
        debug!("Loaded tree with {} nodes ({} bytes)", tree.len(), bytes);

        Ok(HoeffdingTree {
            config,
            state: RwLock::new(State { tree, cycles: 0 }),
        })
    }

    fn check_model(model: &Model, target: &str, config: &Config) -> Result<()> {
        let feature = model
            .feature(target)
            .ok_or_else(|| HoeffdingError::unknown_feature(target))?;

        if feature.kind != S::TARGET_KIND {
            return Err(HoeffdingError::unsupported_feature(
                target,
                format!("target must be {:?}", S::TARGET_KIND),
            ));
        }
        if !config.split_criterion.supports(feature) {
            return Err(HoeffdingError::unsupported_feature(
                target,
                format!("{:?} cannot score this target", config.split_criterion),
            ));
        }
        if let Some(feature) = model
            .features()
            .iter()
            .find(|f| f.is_categorical() && f.strategy == CategoryStrategy::Expandable)
        {
            return Err(HoeffdingError::unsupported_feature(
                feature.name.clone(),
                "expandable vocabularies are not supported",
            ));
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, State<S>> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("Recovering tree from a poisoned lock");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, State<S>> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("Recovering tree from a poisoned lock");
            poisoned.into_inner()
        })
    }

    /// Growth configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Copy of the feature model.
    pub fn model(&self) -> Model {
        self.read().tree.model.clone()
    }

    /// Target feature name.
    pub fn target(&self) -> String {
        self.read().tree.target.clone()
    }

    /// Copy of the underlying arena.
    pub fn snapshot(&self) -> Tree<S> {
        self.read().tree.clone()
    }

    /// Learns from a single weighted example.
    ///
    /// Returns the outcome of the split attempt the example triggered, or
    /// `None` when it did not trigger one. Examples with a non-positive
    /// weight or without a target value are skipped.
    pub fn train(&self, x: &dyn Example, weight: f64) -> Option<SplitAttemptInfo> {
        if !(weight > 0.0) || !weight.is_finite() {
            debug!("Skipping example with weight {}", weight);
            return None;
        }

        let mut state = self.write();
        let State { tree, cycles } = &mut *state;

        let (leaf_ref, parent) = match tree.traverse(x, tree.root, |_| {}) {
            Position::Node { node_ref, parent } => (node_ref, parent),
            Position::Vacant { parent } => {
                let leaf = tree.add(S::default());
                tree.set_child(parent, leaf);
                (leaf, Some(parent))
            }
            Position::Missing => return None,
        };
        if !tree.get(leaf_ref).is_some_and(Node::is_leaf) {
            debug!("Skipping example stopped at split node {}", leaf_ref);
            return None;
        }

        if !tree.observe(leaf_ref, x, weight, self.config.max_buckets) {
            debug!("Skipping example without {:?}", tree.target);
            return None;
        }

        *cycles += 1;
        if self.config.is_pruning_enabled() && *cycles % self.config.prune_period as u64 == 0 {
            let disabled = tree.prune(self.config.max_learning_nodes);
            info!("Pruned after {} cycles, {} leaves disabled", cycles, disabled);
        }

        let Some(Node {
            kind: NodeKind::Leaf(leaf),
            stats,
        }) = tree.get_mut(leaf_ref)
        else {
            return None;
        };
        let leaf_weight = stats.weight();
        if leaf.is_disabled || leaf_weight - leaf.weight_at_last_eval < self.config.grace_period as f64 {
            return None;
        }
        leaf.weight_at_last_eval = leaf_weight;
        if !stats.is_sufficient() {
            return None;
        }

        let mut candidates = leaf.split_candidates(
            self.config.split_criterion.as_ref(),
            stats,
            self.config.num_pivot_points,
        );

        // null candidate first so that it wins ties
        let mut ranked: Vec<(Option<usize>, f64)> = std::iter::once((None, 0.0))
            .chain(candidates.iter().enumerate().map(|(i, c)| (Some(i), c.merit)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let (best_index, best_merit) = ranked[0];
        let merit_gain = match ranked.get(1) {
            Some(&(_, second)) => best_merit - second,
            None => best_merit,
        };

        let mut attempt = SplitAttemptInfo {
            weight: leaf_weight,
            merit_gain,
            candidates: ranked
                .iter()
                .filter_map(|&(i, merit)| i.map(|i| (candidates[i].feature.clone(), merit)))
                .collect(),
            ..SplitAttemptInfo::default()
        };

        let Some(best_index) = best_index.filter(|_| merit_gain > 0.0) else {
            debug!("No split at node {}: merit gain {}", leaf_ref, merit_gain);
            return Some(attempt);
        };

        let best = candidates.swap_remove(best_index);
        let bound = hoeffding_bound(best.range, self.config.split_confidence, leaf_weight);
        attempt.hoeffding_bound = bound;
        if !should_split(merit_gain, bound, self.config.tie_threshold) {
            debug!(
                "No split at node {}: merit gain {:.4} within bound {:.4}",
                leaf_ref, merit_gain, bound
            );
            return Some(attempt);
        }

        attempt.success = Self::apply_split(tree, leaf_ref, parent, best);
        Some(attempt)
    }

    fn apply_split(
        tree: &mut Tree<S>,
        leaf_ref: NodeRef,
        parent: Option<crate::tree::Branch>,
        best: SplitCandidate<S>,
    ) -> bool {
        let SplitCandidate {
            feature,
            merit,
            pivot,
            pre_split,
            post_split,
            ..
        } = best;

        if !tree.split(leaf_ref, &feature, pre_split, &post_split, pivot) {
            return false;
        }
        match parent {
            Some(branch) => {
                tree.set_child(branch, leaf_ref);
            }
            None => tree.root = leaf_ref,
        }

        info!(
            "Split node {} on {:?} (merit {:.4}, {} branches)",
            leaf_ref,
            feature,
            merit,
            post_split.len()
        );
        true
    }

    /// Routes `x` through the tree and returns the stats of every visited
    /// node, root first.
    pub fn predict(&self, x: &dyn Example) -> Predictions<S> {
        let state = self.read();
        let mut path = Vec::new();
        state
            .tree
            .traverse(x, state.tree.root, |node| path.push(node.stats.clone()));
        Predictions::new(path)
    }

    /// Keeps the `max_learning_nodes` heaviest leaves learning and disables
    /// the rest. Returns the number of disabled leaves.
    pub fn prune(&self, max_learning_nodes: usize) -> usize {
        let disabled = self.write().tree.prune(max_learning_nodes);
        info!("Pruned to {} learning leaves, {} disabled", max_learning_nodes, disabled);
        disabled
    }

    /// Shape summary.
    pub fn info(&self) -> TreeInfo {
        self.read().tree.info()
    }

    /// Serializes the tree. Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, w: W) -> Result<u64> {
        self.read().tree.write_to(w)
    }

    /// Writes an indented text rendering of the tree.
    pub fn write_text<W: Write>(&self, w: W) -> Result<u64> {
        self.read().tree.write_text(w)
    }

    /// Writes a Graphviz rendering of the tree.
    pub fn write_dot<W: Write>(&self, w: W) -> Result<u64> {
        self.read().tree.write_dot(w)
    }
}
