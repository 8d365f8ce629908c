//! Arena nodes.

use crate::core::sparse_dense::SparseDense;
use crate::core::types::NodeRef;
use crate::model::{Example, Feature, Model};
use crate::observer::FeatureStats;
use crate::split::{SplitCandidate, SplitCriterion};
use crate::stats::TargetStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of the tree together with the target stats it has seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Node<S: TargetStats> {
    /// Leaf or split
    pub kind: NodeKind<S>,
    /// Target stats; frozen once the node is split
    pub stats: S,
}

/// Node variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum NodeKind<S: TargetStats> {
    /// Learning (or disabled) leaf
    Leaf(LeafNode<S>),
    /// Internal decision node
    Split(SplitNode),
}

/// Leaf state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct LeafNode<S: TargetStats> {
    /// Observers keyed by predictor name
    pub feature_stats: BTreeMap<String, FeatureStats<S>>,
    /// Node weight at the last split attempt
    pub weight_at_last_eval: f64,
    /// Disabled leaves keep their stats but stop observing predictors
    pub is_disabled: bool,
}

/// Split state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitNode {
    /// Predictor the node splits on
    pub feature: String,
    /// Pivot of a numerical split
    pub pivot: Option<f64>,
    /// Branch index to child reference
    pub children: SparseDense<NodeRef>,
}

impl<S: TargetStats> Node<S> {
    /// Creates a leaf that starts from `stats`.
    pub fn leaf(stats: S) -> Self {
        let weight = stats.weight();
        Node {
            kind: NodeKind::Leaf(LeafNode::new(weight)),
            stats,
        }
    }

    /// Total observed weight.
    pub fn weight(&self) -> f64 {
        self.stats.weight()
    }

    /// Returns true for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Leaf state, if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&LeafNode<S>> {
        match &self.kind {
            NodeKind::Leaf(leaf) => Some(leaf),
            NodeKind::Split(_) => None,
        }
    }

    /// Mutable leaf state, if this node is a leaf.
    pub fn as_leaf_mut(&mut self) -> Option<&mut LeafNode<S>> {
        match &mut self.kind {
            NodeKind::Leaf(leaf) => Some(leaf),
            NodeKind::Split(_) => None,
        }
    }

    /// Split state, if this node is a split.
    pub fn as_split(&self) -> Option<&SplitNode> {
        match &self.kind {
            NodeKind::Split(split) => Some(split),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Mutable split state, if this node is a split.
    pub fn as_split_mut(&mut self) -> Option<&mut SplitNode> {
        match &mut self.kind {
            NodeKind::Split(split) => Some(split),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Observes example `x`.
    ///
    /// The target always updates the node stats; predictors are only
    /// recorded by enabled leaves. Returns false when the target is missing,
    /// in which case nothing is recorded.
    pub fn observe(
        &mut self,
        model: &Model,
        target: &Feature,
        x: &dyn Example,
        weight: f64,
        max_buckets: usize,
    ) -> bool {
        let Some(value) = S::target_of(target, x) else {
            return false;
        };
        self.stats.observe(value, weight);

        if let NodeKind::Leaf(leaf) = &mut self.kind {
            if !leaf.is_disabled {
                for feature in model.predictors(&target.name) {
                    leaf.observe(feature, x, value, weight, max_buckets);
                }
            }
        }
        true
    }
}

impl<S: TargetStats> LeafNode<S> {
    /// Creates an enabled leaf without feature stats.
    pub fn new(weight_at_last_eval: f64) -> Self {
        LeafNode {
            feature_stats: BTreeMap::new(),
            weight_at_last_eval,
            is_disabled: false,
        }
    }

    fn observe(
        &mut self,
        feature: &Feature,
        x: &dyn Example,
        target: S::Target,
        weight: f64,
        max_buckets: usize,
    ) {
        match self.feature_stats.get_mut(feature.name.as_str()) {
            Some(stats) => stats.observe(feature, x, target, weight),
            None => {
                let mut stats = FeatureStats::for_feature(feature, max_buckets);
                stats.observe(feature, x, target, weight);
                self.feature_stats.insert(feature.name.clone(), stats);
            }
        }
    }

    /// Best split on the named predictor.
    pub fn evaluate_split(
        &self,
        feature: &str,
        criterion: &dyn SplitCriterion,
        pre: &S,
        num_pivot_points: usize,
    ) -> Option<SplitCandidate<S>> {
        self.feature_stats
            .get(feature)?
            .evaluate_split(feature, criterion, pre, num_pivot_points)
    }

    /// Best split per predictor, in predictor name order.
    pub fn split_candidates(
        &self,
        criterion: &dyn SplitCriterion,
        pre: &S,
        num_pivot_points: usize,
    ) -> Vec<SplitCandidate<S>> {
        self.feature_stats
            .iter()
            .filter_map(|(name, stats)| stats.evaluate_split(name, criterion, pre, num_pivot_points))
            .collect()
    }

    /// Stops predictor observation and drops the collected feature stats.
    pub fn disable(&mut self) {
        self.is_disabled = true;
        self.feature_stats.clear();
    }

    /// Resumes predictor observation. A re-enabled leaf starts with empty
    /// feature stats; an already enabled leaf is left untouched.
    pub fn enable(&mut self) {
        if self.is_disabled {
            self.is_disabled = false;
            self.feature_stats = BTreeMap::new();
        }
    }
}

impl SplitNode {
    /// Branch index `x` follows, or `None` when its value is missing.
    pub fn branch(&self, feature: &Feature, x: &dyn Example) -> Option<usize> {
        match self.pivot {
            Some(pivot) => {
                let value = feature.number(x);
                if !value.is_finite() {
                    return None;
                }
                Some(if value < pivot { 0 } else { 1 })
            }
            None => feature.category(x),
        }
    }

    /// Child reference of `index`, `None` when vacant.
    pub fn child(&self, index: usize) -> Option<NodeRef> {
        self.children.get(index).copied()
    }

    /// Human-readable condition of branch `index`.
    pub fn condition(&self, feature: &Feature, index: usize) -> String {
        match self.pivot {
            Some(pivot) if index == 0 => format!("{} < {:.2}", feature.name, pivot),
            Some(pivot) => format!("{} >= {:.2}", feature.name, pivot),
            None => {
                let value = feature.value_of(index).unwrap_or_else(|| index.to_string());
                format!("{} = {}", feature.name, value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MapExample;
    use crate::split::DefaultCriterion;
    use crate::stats::{ClassStats, StreamStats};

    fn model() -> Model {
        Model::new(vec![
            Feature::categorical("play", ["yes", "no"]),
            Feature::categorical("outlook", ["rainy", "overcast", "sunny"]),
            Feature::numerical("temp"),
        ])
        .unwrap()
    }

    fn example(play: &str, outlook: &str, temp: f64) -> MapExample {
        MapExample::new()
            .with("play", play)
            .with("outlook", outlook)
            .with("temp", temp)
    }

    #[test]
    fn test_leaf_observe() {
        let model = model();
        let target = model.feature("play").unwrap().clone();
        let mut node: Node<ClassStats> = Node::leaf(ClassStats::new());

        assert!(node.observe(&model, &target, &example("yes", "sunny", 21.0), 1.0, 12));
        assert!(node.observe(&model, &target, &example("no", "rainy", 12.0), 2.0, 12));
        assert!(!node.observe(&model, &target, &MapExample::new().with("outlook", "sunny"), 1.0, 12));

        assert_eq!(node.weight(), 3.0);
        let leaf = node.as_leaf().unwrap();
        let names: Vec<&str> = leaf.feature_stats.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["outlook", "temp"]);
        assert_eq!(leaf.weight_at_last_eval, 0.0);
    }

    #[test]
    fn test_split_candidates_in_name_order() {
        let model = model();
        let target = model.feature("play").unwrap().clone();
        let mut node: Node<ClassStats> = Node::leaf(ClassStats::new());
        for (play, outlook, temp) in [
            ("yes", "sunny", 25.0),
            ("yes", "overcast", 22.0),
            ("no", "rainy", 10.0),
            ("no", "rainy", 12.0),
        ] {
            node.observe(&model, &target, &example(play, outlook, temp), 1.0, 12);
        }

        let leaf = node.as_leaf().unwrap();
        let candidates = leaf.split_candidates(&DefaultCriterion::default(), &node.stats, 11);
        let names: Vec<&str> = candidates.iter().map(|c| c.feature.as_str()).collect();
        assert_eq!(names, vec!["outlook", "temp"]);
        assert!(candidates[1].pivot.is_some());

        let outlook = leaf
            .evaluate_split("outlook", &DefaultCriterion::default(), &node.stats, 11)
            .unwrap();
        assert_eq!(outlook.merit, candidates[0].merit);
        assert!(leaf
            .evaluate_split("humidity", &DefaultCriterion::default(), &node.stats, 11)
            .is_none());
    }

    #[test]
    fn test_disable_and_enable() {
        let model = model();
        let target = model.feature("play").unwrap().clone();
        let mut node: Node<ClassStats> = Node::leaf(ClassStats::new());
        node.observe(&model, &target, &example("yes", "sunny", 21.0), 1.0, 12);

        node.as_leaf_mut().unwrap().disable();
        node.observe(&model, &target, &example("no", "sunny", 21.0), 1.0, 12);
        assert_eq!(node.weight(), 2.0);
        assert!(node.as_leaf().unwrap().feature_stats.is_empty());

        node.as_leaf_mut().unwrap().enable();
        node.observe(&model, &target, &example("no", "rainy", 9.0), 1.0, 12);
        let leaf = node.as_leaf().unwrap();
        assert!(!leaf.is_disabled);
        assert_eq!(leaf.feature_stats.len(), 2);

        // enabling an active leaf keeps its stats
        node.as_leaf_mut().unwrap().enable();
        assert_eq!(node.as_leaf().unwrap().feature_stats.len(), 2);
    }

    #[test]
    fn test_split_branches() {
        let temp = Feature::numerical("temp");
        let split = SplitNode {
            feature: "temp".to_string(),
            pivot: Some(18.5),
            children: SparseDense::new(),
        };
        assert_eq!(split.branch(&temp, &MapExample::new().with("temp", 10)), Some(0));
        assert_eq!(split.branch(&temp, &MapExample::new().with("temp", 18.5)), Some(1));
        assert_eq!(split.branch(&temp, &MapExample::new()), None);
        assert_eq!(split.condition(&temp, 0), "temp < 18.50");
        assert_eq!(split.condition(&temp, 1), "temp >= 18.50");

        let outlook = Feature::categorical("outlook", ["rainy", "overcast", "sunny"]);
        let split = SplitNode {
            feature: "outlook".to_string(),
            pivot: None,
            children: vec![(1, 4)].into_iter().collect(),
        };
        assert_eq!(split.branch(&outlook, &MapExample::new().with("outlook", "sunny")), Some(2));
        assert_eq!(split.child(1), Some(4));
        assert_eq!(split.child(2), None);
        assert_eq!(split.condition(&outlook, 1), "outlook = overcast");
    }

    #[test]
    fn test_regression_leaf() {
        let model = Model::new(vec![Feature::numerical("hours"), Feature::numerical("temp")]).unwrap();
        let target = model.feature("hours").unwrap().clone();
        let mut node: Node<StreamStats> = Node::leaf(StreamStats::new());
        node.observe(&model, &target, &MapExample::new().with("hours", 30).with("temp", 20), 1.0, 12);
        node.observe(&model, &target, &MapExample::new().with("temp", 20), 1.0, 12);
        assert_eq!(node.weight(), 1.0);
        assert_eq!(node.stats.mean(), 30.0);
    }
}
