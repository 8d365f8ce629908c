//! Common test utilities for Hoeffding Rust integration tests.

#![allow(dead_code)]

use hoeffding_rust::*;
use rand::prelude::*;

/// Route log output through the test harness; safe to call repeatedly
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The classic "play tennis" model
pub fn weather_model() -> Model {
    Model::new(vec![
        Feature::categorical("play", ["yes", "no"]),
        Feature::categorical("outlook", ["rainy", "overcast", "sunny"]),
        Feature::categorical("temp", ["hot", "mild", "cool"]),
        Feature::categorical("humidity", ["normal", "high"]),
        Feature::categorical("windy", ["true", "false"]),
    ])
    .unwrap()
}

/// The 14 weather rows as `(outlook, temp, humidity, windy, play)`
pub const WEATHER_ROWS: [(&str, &str, &str, &str, &str); 14] = [
    ("rainy", "hot", "high", "false", "no"),
    ("rainy", "hot", "high", "true", "no"),
    ("overcast", "hot", "high", "false", "yes"),
    ("sunny", "mild", "high", "false", "yes"),
    ("sunny", "cool", "normal", "false", "yes"),
    ("sunny", "cool", "normal", "true", "no"),
    ("overcast", "cool", "normal", "true", "yes"),
    ("rainy", "mild", "high", "false", "no"),
    ("rainy", "cool", "normal", "false", "yes"),
    ("sunny", "mild", "normal", "false", "yes"),
    ("rainy", "mild", "normal", "true", "yes"),
    ("overcast", "mild", "high", "true", "yes"),
    ("overcast", "hot", "normal", "false", "yes"),
    ("sunny", "mild", "high", "true", "no"),
];

/// Weather rows as examples
pub fn weather_examples() -> Vec<MapExample> {
    WEATHER_ROWS
        .iter()
        .map(|&(outlook, temp, humidity, windy, play)| {
            MapExample::new()
                .with("outlook", outlook)
                .with("temp", temp)
                .with("humidity", humidity)
                .with("windy", windy)
                .with("play", play)
        })
        .collect()
}

/// Configuration the weather scenario is grown with
pub fn weather_config() -> Config {
    ConfigBuilder::new()
        .grace_period(2)
        .split_confidence(0.1)
        .build()
        .unwrap()
}

/// Weather tree trained on all 14 rows
pub fn trained_weather_tree() -> ClassificationTree {
    let tree = ClassificationTree::new(weather_model(), "play", weather_config()).unwrap();
    for x in weather_examples() {
        tree.train(&x, 1.0);
    }
    tree
}

/// Model with a numerical target `y` and predictors `x` and `noise`
pub fn step_model() -> Model {
    Model::new(vec![
        Feature::numerical("y"),
        Feature::numerical("x"),
        Feature::numerical("noise"),
    ])
    .unwrap()
}

/// Stream where `y` jumps from about 1 to about 9 at `x = 5`
pub fn step_examples(num_samples: usize, seed: u64) -> Vec<MapExample> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_samples)
        .map(|_| {
            let x: f64 = rng.gen_range(0.0..10.0);
            let base = if x < 5.0 { 1.0 } else { 9.0 };
            MapExample::new()
                .with("x", x)
                .with("noise", rng.gen_range(0.0..10.0))
                .with("y", base + rng.gen_range(-0.5..0.5))
        })
        .collect()
}

/// Model with a binary target driven by two categorical predictors
pub fn xor_model() -> Model {
    Model::new(vec![
        Feature::categorical("label", ["off", "on"]),
        Feature::categorical("a", ["0", "1", "2", "3"]),
        Feature::categorical("b", ["0", "1", "2", "3"]),
        Feature::numerical("level"),
    ])
    .unwrap()
}

/// Stream where `label` is on when `a` is even, with 5% label noise
pub fn xor_examples(num_samples: usize, seed: u64) -> Vec<MapExample> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_samples)
        .map(|_| {
            let a: usize = rng.gen_range(0..4);
            let b: usize = rng.gen_range(0..4);
            let mut on = a % 2 == 0;
            if rng.gen_bool(0.05) {
                on = !on;
            }
            MapExample::new()
                .with("a", a.to_string())
                .with("b", b.to_string())
                .with("level", rng.gen_range(0.0..1.0))
                .with("label", if on { "on" } else { "off" })
        })
        .collect()
}

/// Build a seeded example stream for a named scenario
#[macro_export]
macro_rules! create_test_stream {
    (step, $n:expr) => {
        common::step_examples($n, 42)
    };
    (xor, $n:expr) => {
        common::xor_examples($n, 42)
    };
}
