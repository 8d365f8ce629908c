//! Node arena and tree structure.
//!
//! - [`arena`]: the [`Tree`] arena with traversal, splitting and pruning
//! - [`node`]: leaf and split node variants
//! - [`info`]: shape summaries and split attempt reports
//! - [`export`]: text and Graphviz output

pub mod arena;
pub mod export;
pub mod info;
pub mod node;

pub use arena::{Branch, Position, Tree};
pub use info::{SplitAttemptInfo, TreeInfo};
pub use node::{LeafNode, Node, NodeKind, SplitNode};
