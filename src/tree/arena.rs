//! Arena-backed tree storage.
//!
//! Nodes live in a flat vector and refer to each other through 1-based
//! [`NodeRef`]s, with [`NO_NODE`] marking an absent child. Splitting converts
//! a leaf in place and appends its children, so a reference, once handed
//! out, keeps pointing at the same logical node for the lifetime of the
//! tree.

use super::info::TreeInfo;
use super::node::{Node, NodeKind, SplitNode};
use crate::core::sparse_dense::SparseDense;
use crate::core::types::{NodeRef, NO_NODE};
use crate::model::{Example, Model};
use crate::stats::{Distribution, TargetStats};

/// Parent link of a node: the split node and the branch index taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    /// Split node reference
    pub node_ref: NodeRef,
    /// Branch index within the split
    pub index: usize,
}

/// Where a traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Stopped at a leaf, or at a split the example has no value for
    Node {
        /// Node the walk stopped at
        node_ref: NodeRef,
        /// Branch that led there, `None` for the start node
        parent: Option<Branch>,
    },
    /// The branch the example follows has no child yet
    Vacant {
        /// The vacant branch
        parent: Branch,
    },
    /// The start reference does not resolve
    Missing,
}

/// Node arena plus the model and target it was grown for.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<S: TargetStats> {
    /// Feature model
    pub model: Model,
    /// Target feature name
    pub target: String,
    /// Root reference
    pub root: NodeRef,
    pub(crate) nodes: Vec<Node<S>>,
}

impl<S: TargetStats> Tree<S> {
    /// Creates a tree holding a single empty root leaf.
    pub fn new(model: Model, target: impl Into<String>) -> Self {
        let mut tree = Tree {
            model,
            target: target.into(),
            root: NO_NODE,
            nodes: Vec::new(),
        };
        tree.root = tree.add(S::default());
        tree
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[Node<S>] {
        &self.nodes
    }

    /// Appends a leaf starting from `stats`.
    pub fn add(&mut self, stats: S) -> NodeRef {
        self.nodes.push(Node::leaf(stats));
        self.nodes.len()
    }

    /// Resolves a reference.
    pub fn get(&self, node_ref: NodeRef) -> Option<&Node<S>> {
        node_ref.checked_sub(1).and_then(|i| self.nodes.get(i))
    }

    /// Resolves a reference mutably.
    pub fn get_mut(&mut self, node_ref: NodeRef) -> Option<&mut Node<S>> {
        node_ref.checked_sub(1).and_then(move |i| self.nodes.get_mut(i))
    }

    /// Records `x` at `node_ref`. Returns false when the reference does not
    /// resolve or the example has no target value.
    pub fn observe(&mut self, node_ref: NodeRef, x: &dyn Example, weight: f64, max_buckets: usize) -> bool {
        let Some(target) = self.model.feature(&self.target) else {
            return false;
        };
        let Some(node) = node_ref.checked_sub(1).and_then(|i| self.nodes.get_mut(i)) else {
            return false;
        };
        node.observe(&self.model, target, x, weight, max_buckets)
    }

    /// Walks from `start` towards the leaf `x` belongs to, calling `visit`
    /// on every node passed.
    pub fn traverse<F>(&self, x: &dyn Example, start: NodeRef, mut visit: F) -> Position
    where
        F: FnMut(&Node<S>),
    {
        let mut node_ref = start;
        let mut parent = None;

        loop {
            let Some(node) = self.get(node_ref) else {
                return Position::Missing;
            };
            visit(node);

            let NodeKind::Split(split) = &node.kind else {
                return Position::Node { node_ref, parent };
            };
            let Some(index) = self
                .model
                .feature(&split.feature)
                .and_then(|feature| split.branch(feature, x))
            else {
                return Position::Node { node_ref, parent };
            };

            let branch = Branch { node_ref, index };
            match split.child(index) {
                Some(child) => {
                    parent = Some(branch);
                    node_ref = child;
                }
                None => return Position::Vacant { parent: branch },
            }
        }
    }

    /// Links `child` into branch `parent`. Returns false unless `parent`
    /// refers to a split node.
    pub fn set_child(&mut self, parent: Branch, child: NodeRef) -> bool {
        match self.get_mut(parent.node_ref).and_then(Node::as_split_mut) {
            Some(split) => {
                split.children.set(parent.index, child);
                true
            }
            None => false,
        }
    }

    /// Converts leaf `leaf_ref` into a split on `feature`.
    ///
    /// One child leaf is appended per non-empty branch of `post`, in
    /// ascending branch order. The split keeps `pre` as its frozen stats.
    /// Returns false, leaving the tree untouched, when `leaf_ref` is not a
    /// leaf.
    pub fn split(
        &mut self,
        leaf_ref: NodeRef,
        feature: &str,
        pre: S,
        post: &Distribution<S>,
        pivot: Option<f64>,
    ) -> bool {
        if !self.get(leaf_ref).is_some_and(Node::is_leaf) {
            return false;
        }

        let mut children = SparseDense::new();
        for (index, stats) in post.iter() {
            let child = self.add(stats.clone());
            children.set(index, child);
        }

        let split = SplitNode {
            feature: feature.to_string(),
            pivot,
            children,
        };
        if let Some(node) = self.get_mut(leaf_ref) {
            *node = Node {
                kind: NodeKind::Split(split),
                stats: pre,
            };
        }
        true
    }

    /// References of all leaves, in arena order.
    pub fn filter_leaves(&self) -> Vec<NodeRef> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_leaf())
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Keeps the `max_active` heaviest leaves learning and disables the
    /// rest. Returns the number of disabled leaves.
    pub fn prune(&mut self, max_active: usize) -> usize {
        let mut leaves = self.filter_leaves();
        leaves.sort_by(|&a, &b| {
            let wa = self.get(a).map_or(0.0, Node::weight);
            let wb = self.get(b).map_or(0.0, Node::weight);
            wb.total_cmp(&wa)
        });

        let mut disabled = 0;
        for (rank, node_ref) in leaves.into_iter().enumerate() {
            let Some(leaf) = self.get_mut(node_ref).and_then(Node::as_leaf_mut) else {
                continue;
            };
            if rank < max_active {
                leaf.enable();
            } else {
                leaf.disable();
                disabled += 1;
            }
        }
        disabled
    }

    /// Folds the subtree at `node_ref` into `info`.
    pub fn accumulate(&self, node_ref: NodeRef, depth: usize, info: &mut TreeInfo) {
        let Some(node) = self.get(node_ref) else {
            return;
        };

        info.num_nodes += 1;
        info.max_depth = info.max_depth.max(depth);

        match &node.kind {
            NodeKind::Split(split) => {
                for (_, &child) in split.children.iter() {
                    self.accumulate(child, depth + 1, info);
                }
            }
            NodeKind::Leaf(leaf) if leaf.is_disabled => info.num_disabled += 1,
            NodeKind::Leaf(_) => info.num_learning += 1,
        }
    }

    /// Shape summary of the whole tree.
    pub fn info(&self) -> TreeInfo {
        let mut info = TreeInfo::default();
        self.accumulate(self.root, 1, &mut info);
        info
    }
}
