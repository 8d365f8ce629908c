//! Pruning integration tests.

use hoeffding_rust::*;

mod common;
use common::*;

fn xor_config(prune_period: usize, max_learning_nodes: usize) -> Config {
    ConfigBuilder::new()
        .grace_period(20)
        .split_confidence(1e-3)
        .prune_period(prune_period)
        .max_learning_nodes(max_learning_nodes)
        .build()
        .unwrap()
}

fn learning_flags(tree: &ClassificationTree) -> Vec<bool> {
    let snapshot = tree.snapshot();
    snapshot
        .filter_leaves()
        .into_iter()
        .filter_map(|r| snapshot.get(r).and_then(|node| node.as_leaf()))
        .map(|leaf| !leaf.is_disabled)
        .collect()
}

#[test]
fn test_prune_keeps_heaviest_leaves() {
    init_logging();
    let tree = ClassificationTree::new(xor_model(), "label", xor_config(0, 100)).unwrap();
    for x in create_test_stream!(xor, 1000) {
        tree.train(&x, 1.0);
    }

    let before = tree.info();
    let num_leaves = before.num_learning;
    assert!(num_leaves >= 4, "{}", before);
    assert_eq!(before.num_disabled, 0);

    let disabled = tree.prune(2);
    assert_eq!(disabled, num_leaves - 2);

    let after = tree.info();
    assert_eq!(after.num_nodes, before.num_nodes);
    assert_eq!(after.num_learning, 2);
    assert_eq!(after.num_disabled, num_leaves - 2);

    // enabled leaves are at least as heavy as every disabled one
    let snapshot = tree.snapshot();
    let (mut active, mut inactive) = (Vec::new(), Vec::new());
    for r in snapshot.filter_leaves() {
        let node = snapshot.get(r).unwrap();
        if node.as_leaf().unwrap().is_disabled {
            inactive.push(node.weight());
            assert!(node.as_leaf().unwrap().feature_stats.is_empty());
        } else {
            active.push(node.weight());
        }
    }
    let lightest_active = active.iter().cloned().fold(f64::INFINITY, f64::min);
    assert!(inactive.iter().all(|&w| w <= lightest_active));
}

#[test]
fn test_disabled_leaves_keep_predicting() {
    let tree = ClassificationTree::new(xor_model(), "label", xor_config(0, 100)).unwrap();
    for x in create_test_stream!(xor, 1000) {
        tree.train(&x, 1.0);
    }
    let probe = MapExample::new().with("a", "2").with("b", "0");
    let before = tree.predict(&probe);

    tree.prune(1);
    let nodes = tree.info().num_nodes;
    for x in common::xor_examples(500, 7) {
        tree.train(&x, 1.0);
    }

    // disabled leaves still count targets but never split
    assert_eq!(tree.info().num_nodes, nodes);
    let after = tree.predict(&probe);
    assert!(after.best().unwrap().weight() >= before.best().unwrap().weight());
    assert_eq!(after.top().map(|(cat, _)| cat), Some(1));
}

#[test]
fn test_prune_reenables_leaves() {
    let tree = ClassificationTree::new(xor_model(), "label", xor_config(0, 100)).unwrap();
    for x in create_test_stream!(xor, 1000) {
        tree.train(&x, 1.0);
    }

    tree.prune(1);
    assert_eq!(learning_flags(&tree).iter().filter(|&&on| on).count(), 1);

    assert_eq!(tree.prune(1000), 0);
    assert!(learning_flags(&tree).iter().all(|&on| on));
}

#[test]
fn test_periodic_pruning() {
    let tree = ClassificationTree::new(xor_model(), "label", xor_config(100, 1)).unwrap();
    for x in create_test_stream!(xor, 1000) {
        tree.train(&x, 1.0);
    }

    let info = tree.info();
    assert!(info.num_disabled >= 1, "{}", info);
    assert_eq!(info.num_learning + info.num_disabled, learning_flags(&tree).len());
}

#[test]
fn test_pruning_disabled_by_zero_period() {
    let config = xor_config(0, 1);
    assert!(!config.is_pruning_enabled());

    let tree = ClassificationTree::new(xor_model(), "label", config).unwrap();
    for x in create_test_stream!(xor, 1000) {
        tree.train(&x, 1.0);
    }
    assert_eq!(tree.info().num_disabled, 0);
}
