//! Binary persistence of trees.
//!
//! Trees are written as a length-prefixed sequence of tagged fields (see
//! [`persist`]). Node and model payloads are encoded with `bincode` using
//! fixed-width little-endian integers, so stored stats are bit-exact.

pub mod counting;
pub mod persist;
pub mod wire;

pub use counting::{CountingReader, CountingWriter};
pub use wire::WireType;
