//! Concurrent training and prediction tests.

use approx::assert_abs_diff_eq;
use hoeffding_rust::*;
use std::sync::Arc;
use std::thread;

mod common;
use common::*;

#[test]
fn test_parallel_training_counts_every_example() {
    init_logging();
    let config = ConfigBuilder::new().grace_period(10_000).build().unwrap();
    let tree = Arc::new(ClassificationTree::new(xor_model(), "label", config).unwrap());

    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for x in xor_examples(500, seed) {
                    tree.train(&x, 1.0);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let root = tree.predict(&MapExample::new());
    assert_eq!(root.best().unwrap().weight(), 2000.0);
    assert_eq!(tree.info().num_nodes, 1);
}

#[test]
fn test_readers_alongside_writer() {
    let tree = Arc::new(RegressionTree::new(step_model(), "y", Config::default()).unwrap());

    let writer = {
        let tree = Arc::clone(&tree);
        thread::spawn(move || {
            for x in step_examples(1000, 3) {
                tree.train(&x, 1.0);
            }
        })
    };
    let readers: Vec<_> = (0..3)
        .map(|_| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                let probe = MapExample::new().with("x", 2.0).with("noise", 1.0);
                let mut last = 0.0;
                for _ in 0..200 {
                    let predictions = tree.predict(&probe);
                    let weight = predictions.iter().next().map_or(0.0, |s| s.weight());
                    assert!(weight >= last);
                    last = weight;
                    let mut sink = Vec::new();
                    tree.write_text(&mut sink).unwrap();
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert!(tree.info().num_nodes > 1);
    let low = tree.predict(&MapExample::new().with("x", 2.0));
    assert_abs_diff_eq!(low.mean(), 1.0, epsilon = 1.0);
}
