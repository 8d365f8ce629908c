//! Configuration management for Hoeffding trees.
//!
//! Tunables, their defaults and validation live in [`core`](self::core);
//! defaults are taken from [`crate::core::constants`].

pub mod core;

pub use self::core::{Config, ConfigBuilder};
